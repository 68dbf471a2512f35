use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

use crate::routes::AppState;

/// Page routes and the HTML file each one serves
pub const PAGES: [(&str, &str); 6] = [
    ("/", "index.html"),
    ("/preferences", "preferences.html"),
    ("/dashboard", "dashboard.html"),
    ("/my_wardrobe", "my_wardrobe.html"),
    ("/profile", "profile.html"),
    ("/register", "register.html"),
];

/// Routes serving the static HTML pages from `pages_dir`
pub fn page_routes(pages_dir: &Path) -> Router<AppState> {
    PAGES
        .iter()
        .fold(Router::new(), |router, (route, file)| {
            router.route_service(route, ServeFile::new(pages_dir.join(file)))
        })
}
