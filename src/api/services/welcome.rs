use actix_web::{HttpResponse, Resource, web};

const WELCOME_PAGE: &str = "<center><h2>Welcome to shortkey</h2>\
<p>POST a JSON body <code>{\"URL\": \"https://...\"}</code> to <code>/api/v1/url/shorten</code>.</p></center>";

pub struct WelcomeService;

impl WelcomeService {
    pub async fn welcome() -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(WELCOME_PAGE)
    }
}

pub fn welcome_routes() -> Resource {
    web::resource("/").route(web::get().to(WelcomeService::welcome))
}
