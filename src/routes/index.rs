use axum::response::{Html, IntoResponse};
use rinja_axum::Template;

#[derive(Template)]
#[template(path = "index.html")]
struct PortfolioTemplate {
    title: String,
}

pub async fn index() -> impl IntoResponse {
    let template = PortfolioTemplate {
        title: String::from("StoreStash"),
    };
    Html(template.render().unwrap())
}
