pub mod backup;
pub mod health;
pub mod helpers;
pub mod redirect;
pub mod shorten;
pub mod welcome;

use std::sync::Arc;

use crate::keygen::KeyFactory;
use crate::store::UrlStore;

/// Store handle shared by every worker.
pub type SharedStore = Arc<UrlStore>;

/// Key factory shared by every worker.
pub type SharedFactory = Arc<KeyFactory<UrlStore>>;

pub use backup::{BackupService, BackupSettings, backup_routes};
pub use health::{AppStartTime, HealthService, health_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use shorten::{ShortenService, UrlPayload, shorten_routes};
pub use welcome::{WelcomeService, welcome_routes};
