use actix_web::HttpRequest;

/// Resolve a relative endpoint path to an absolute URL
///
/// A configured base URL wins; otherwise the scheme and authority come from
/// the inbound request's connection info, which honours forwarded headers.
pub fn absolute_url(base_override: Option<&str>, path: &str, req: &HttpRequest) -> String {
    match base_override {
        Some(base) => format!("{}{}", base.trim_end_matches('/'), path),
        None => {
            let info = req.connection_info();
            format!("{}://{}{}", info.scheme(), info.host(), path)
        }
    }
}
