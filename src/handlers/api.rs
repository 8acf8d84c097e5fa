//! # Endpoints Dinámicos
//! src/handlers/api.rs
//!
//! Endpoints de ejemplo bajo el prefijo API:
//! - /app/hello: Saludo con timestamp (GET y POST)
//! - /app/time: Hora actual en dos formatos
//! - /app/sum: Suma de dos números
//! - /app/pi: Valor de π en texto plano
//!
//! Cada handler es una función pura del request; ninguno toca estado
//! compartido.

use crate::http::query::parse_query_string;
use crate::http::{Method, Request, Response};
use crate::router::Router;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Nombre usado cuando no llega `name`
pub const DEFAULT_NAME: &str = "Mundo";

/// Registra todos los endpoints de ejemplo bajo el prefijo API del router
///
/// `hello` y `pi` también quedan con el prefijo capitalizado
/// (`/App/hello`, `/App/pi`).
pub fn register_routes(router: &mut Router) {
    let prefix = router.api_prefix().to_string();
    let capitalized = capitalize_prefix(&prefix);

    for base in [&prefix, &capitalized] {
        router.register(&format!("{base}hello"), &[Method::GET, Method::POST], hello_handler);
        router.get(&format!("{base}pi"), pi_handler);
    }
    router.get(&format!("{prefix}time"), time_handler);
    router.get(&format!("{prefix}sum"), sum_handler);
}

/// "/app/" → "/App/"
fn capitalize_prefix(prefix: &str) -> String {
    let mut chars = prefix.chars();
    match (chars.next(), chars.next()) {
        (Some('/'), Some(first)) => format!("/{}{}", first.to_uppercase(), chars.as_str()),
        _ => prefix.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct Greeting {
    message: String,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct CurrentTime {
    current_time: String,
    formatted_time: String,
}

/// Handler para /app/hello?name=X
///
/// En POST, si la query no trae `name`, se busca en un body
/// `application/x-www-form-urlencoded`.
///
/// # Ejemplo de response
/// ```json
/// {"message": "¡Hola, Ada!", "timestamp": "2024-05-01T10:15:30.123"}
/// ```
pub fn hello_handler(req: &mut Request) -> Response {
    let mut name = req
        .query_param("name")
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    if name.is_none() && req.method() == &Method::POST && is_form_body(req) {
        name = req
            .read_body_string()
            .and_then(|body| parse_query_string(&body).remove("name"))
            .filter(|name| !name.is_empty());
    }

    let greeting = Greeting {
        message: format!("¡Hola, {}!", name.as_deref().unwrap_or(DEFAULT_NAME)),
        timestamp: iso_local(&Local::now()),
    };

    json_response(&greeting)
}

/// Handler para /app/time
///
/// # Ejemplo de response
/// ```json
/// {"current_time": "2024-05-01T10:15:30.123", "formatted_time": "01/05/2024 10:15:30"}
/// ```
pub fn time_handler(_req: &mut Request) -> Response {
    let now = Local::now();
    let time = CurrentTime {
        current_time: iso_local(&now),
        formatted_time: now.format("%d/%m/%Y %H:%M:%S").to_string(),
    };

    json_response(&time)
}

/// Handler para /app/sum?a=X&b=Y
///
/// Parámetros ausentes valen 0. Si alguno no es un número finito, o la
/// suma desborda, se responde un JSON de error con status 200.
///
/// # Ejemplo de response
/// ```json
/// {"a": 2.00, "b": 3.50, "sum": 5.50}
/// ```
pub fn sum_handler(req: &mut Request) -> Response {
    let a = parse_operand(req.query_param("a"));
    let b = parse_operand(req.query_param("b"));

    // Dos decimales fijos, por eso el JSON se arma a mano
    let body = match (a, b) {
        (Some(a), Some(b)) if (a + b).is_finite() => format!(
            r#"{{"a": {:.2}, "b": {:.2}, "sum": {:.2}}}"#,
            a,
            b,
            a + b
        ),
        _ => r#"{"error": "Parámetros inválidos. Use números válidos para a y b."}"#.to_string(),
    };

    Response::json(&body)
}

/// Handler para /app/pi
pub fn pi_handler(_req: &mut Request) -> Response {
    Response::text(&std::f64::consts::PI.to_string())
}

fn parse_operand(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw.unwrap_or("0").trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn is_form_body(req: &Request) -> bool {
    req.header("content-type")
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Fecha local ISO-8601 sin zona (ej: 2024-05-01T10:15:30.123456)
fn iso_local(now: &DateTime<Local>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

fn json_response<T: Serialize>(payload: &T) -> Response {
    match serde_json::to_string(payload) {
        Ok(body) => Response::json(&body),
        Err(e) => {
            tracing::error!(error = %e, "no se pudo serializar la respuesta");
            Response::json(r#"{"error": "serialization failed"}"#)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;
    use serde_json::Value;
    use std::io::Cursor;

    fn request(raw: &str) -> Request {
        Request::read_from(Cursor::new(raw.as_bytes().to_vec())).unwrap()
    }

    fn json_of(response: &Response) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    fn assert_iso_local(timestamp: &str) {
        assert!(
            chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok(),
            "not ISO-8601: {timestamp}"
        );
    }

    #[test]
    fn test_hello_with_name() {
        let response = hello_handler(&mut request("GET /app/hello?name=Ada HTTP/1.1\r\n\r\n"));
        let json = json_of(&response);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(json["message"], "¡Hola, Ada!");
        assert_iso_local(json["timestamp"].as_str().unwrap());
    }

    #[test]
    fn test_hello_defaults_to_mundo() {
        let json = json_of(&hello_handler(&mut request("GET /app/hello HTTP/1.1\r\n\r\n")));
        assert_eq!(json["message"], "¡Hola, Mundo!");

        let json = json_of(&hello_handler(&mut request("GET /app/hello?name= HTTP/1.1\r\n\r\n")));
        assert_eq!(json["message"], "¡Hola, Mundo!");
    }

    #[test]
    fn test_hello_escapes_name_in_json() {
        let raw = "GET /app/hello?name=%22Ada%22 HTTP/1.1\r\n\r\n";
        let json = json_of(&hello_handler(&mut request(raw)));
        assert_eq!(json["message"], "¡Hola, \"Ada\"!");
    }

    #[test]
    fn test_hello_post_form_body() {
        let raw = "POST /app/hello HTTP/1.1\r\n\
                   Content-Type: application/x-www-form-urlencoded\r\n\
                   Content-Length: 16\r\n\r\n\
                   name=Grace+Hoppe";
        let json = json_of(&hello_handler(&mut request(raw)));
        assert_eq!(json["message"], "¡Hola, Grace Hoppe!");
    }

    #[test]
    fn test_hello_post_query_wins_over_body() {
        let raw = "POST /app/hello?name=Ada HTTP/1.1\r\n\
                   Content-Type: application/x-www-form-urlencoded\r\n\
                   Content-Length: 10\r\n\r\n\
                   name=Grace";
        let json = json_of(&hello_handler(&mut request(raw)));
        assert_eq!(json["message"], "¡Hola, Ada!");
    }

    #[test]
    fn test_time() {
        let json = json_of(&time_handler(&mut request("GET /app/time HTTP/1.1\r\n\r\n")));

        assert_iso_local(json["current_time"].as_str().unwrap());
        let formatted = json["formatted_time"].as_str().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(formatted, "%d/%m/%Y %H:%M:%S").is_ok());
    }

    #[test]
    fn test_sum() {
        let response = sum_handler(&mut request("GET /app/sum?a=2&b=3.5 HTTP/1.1\r\n\r\n"));
        assert_eq!(response.body(), br#"{"a": 2.00, "b": 3.50, "sum": 5.50}"#);
    }

    #[test]
    fn test_sum_defaults_to_zero() {
        let response = sum_handler(&mut request("GET /app/sum?b=1 HTTP/1.1\r\n\r\n"));
        assert_eq!(response.body(), br#"{"a": 0.00, "b": 1.00, "sum": 1.00}"#);
    }

    #[test]
    fn test_sum_negative_values() {
        let response = sum_handler(&mut request("GET /app/sum?a=-1.25&b=0.5 HTTP/1.1\r\n\r\n"));
        let json = json_of(&response);
        assert_eq!(json["sum"].as_f64(), Some(-0.75));
    }

    #[test]
    fn test_sum_invalid_is_json_error_with_200() {
        let response = sum_handler(&mut request("GET /app/sum?a=x&b=1 HTTP/1.1\r\n\r\n"));
        let json = json_of(&response);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(json["error"].is_string());
        assert!(json.get("sum").is_none());
    }

    #[test]
    fn test_sum_rejects_non_finite() {
        for query in ["a=NaN", "a=inf", "b=-infinity"] {
            let raw = format!("GET /app/sum?{query} HTTP/1.1\r\n\r\n");
            let json = json_of(&sum_handler(&mut request(&raw)));
            assert!(json["error"].is_string(), "{query}");
        }
    }

    #[test]
    fn test_sum_overflow_is_json_error() {
        let response = sum_handler(&mut request("GET /app/sum?a=1e308&b=1e308 HTTP/1.1\r\n\r\n"));
        let json = json_of(&response);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(json["error"].is_string());
        assert!(json.get("sum").is_none());
    }

    #[test]
    fn test_pi() {
        let response = pi_handler(&mut request("GET /App/pi HTTP/1.1\r\n\r\n"));

        assert_eq!(response.body(), b"3.141592653589793");
        assert_eq!(response.header("Content-Type"), Some("text/plain; charset=utf-8"));
    }

    #[test]
    fn test_register_routes() {
        let mut router = Router::new();
        register_routes(&mut router);

        for path in ["/app/hello", "/App/hello", "/app/time", "/app/sum", "/app/pi", "/App/pi"] {
            assert!(router.contains(path), "{path}");
        }

        let response = router.route(&mut request("DELETE /app/hello HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status(), StatusCode::MethodNotAllowed);

        let response = router.route(&mut request("POST /app/time HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status(), StatusCode::MethodNotAllowed);
    }

    #[test]
    fn test_register_routes_custom_prefix() {
        let mut router = Router::with_settings("/api/", "index.html");
        register_routes(&mut router);

        assert!(router.contains("/api/sum"));
        assert!(router.contains("/Api/hello"));
        assert!(!router.contains("/app/sum"));
    }

    #[test]
    fn test_capitalize_prefix() {
        assert_eq!(capitalize_prefix("/app/"), "/App/");
        assert_eq!(capitalize_prefix("/"), "/");
        assert_eq!(capitalize_prefix("/v1/"), "/V1/");
    }
}
