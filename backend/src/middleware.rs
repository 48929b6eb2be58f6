use actix_cors::Cors;

/// Browsers may call the play routes from any origin
pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}
