//! # Decodificación de Query Strings
//! src/http/query.rs
//!
//! Convierte `a=1&name=Ada%20Lovelace` en un mapa ya decodificado.
//! El mismo formato se usa en bodies `application/x-www-form-urlencoded`.
//!
//! Reglas:
//! - Los pares se separan por `&` y cada par por el primer `=`.
//! - Un par sin `=` se descarta completo.
//! - `+` equivale a espacio; `%XX` se decodifica como UTF-8.
//! - Un escape mal formado o bytes que no son UTF-8 descartan el par.
//! - Claves duplicadas: gana la última.

use std::collections::HashMap;

/// Parsea una query string cruda (sin el `?`) en un HashMap
///
/// # Ejemplo
/// ```
/// use raw_http_server::http::query::parse_query_string;
///
/// let params = parse_query_string("name=Ada%20Lovelace&debug&a=1");
/// assert_eq!(params.get("name").map(String::as_str), Some("Ada Lovelace"));
/// assert_eq!(params.get("a").map(String::as_str), Some("1"));
/// assert!(!params.contains_key("debug"));
/// ```
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if query.is_empty() {
        return params;
    }

    for pair in query.split('&') {
        let Some((raw_key, raw_value)) = pair.split_once('=') else {
            continue;
        };

        match (url_decode(raw_key), url_decode(raw_value)) {
            (Some(key), Some(value)) => {
                params.insert(key, value);
            }
            _ => {
                tracing::debug!(pair, "descartando par con escape invalido");
            }
        }
    }

    params
}

/// Decodifica un componente de URL
///
/// Retorna `None` si hay un `%` sin dos dígitos hexadecimales detrás
/// o si el resultado no es UTF-8 válido.
///
/// # Ejemplo
/// ```
/// use raw_http_server::http::query::url_decode;
///
/// assert_eq!(url_decode("hello+world").as_deref(), Some("hello world"));
/// assert_eq!(url_decode("%C2%A1Hola").as_deref(), Some("¡Hola"));
/// assert_eq!(url_decode("100%"), None);
/// ```
pub fn url_decode(component: &str) -> Option<String> {
    if !has_valid_escapes(component.as_bytes()) {
        return None;
    }

    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|decoded| decoded.into_owned())
}

/// `urlencoding` deja pasar `%zz` literal, aquí lo rechazamos
fn has_valid_escapes(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            match hex {
                Some(digits) if digits.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert!(parse_query_string("").is_empty());
    }

    #[test]
    fn test_simple_pairs() {
        let params = parse_query_string("a=2&b=3.5");
        assert_eq!(params.len(), 2);
        assert_eq!(params["a"], "2");
        assert_eq!(params["b"], "3.5");
    }

    #[test]
    fn test_pair_without_equals_is_dropped() {
        let params = parse_query_string("debug&name=Ada&&verbose");
        assert_eq!(params.len(), 1);
        assert_eq!(params["name"], "Ada");
    }

    #[test]
    fn test_value_keeps_extra_equals() {
        let params = parse_query_string("expr=a=b");
        assert_eq!(params["expr"], "a=b");
    }

    #[test]
    fn test_empty_value_is_kept() {
        let params = parse_query_string("name=");
        assert_eq!(params["name"], "");
    }

    #[test]
    fn test_last_writer_wins() {
        let params = parse_query_string("name=Ada&name=Grace");
        assert_eq!(params["name"], "Grace");
    }

    #[test]
    fn test_decodes_key_and_value() {
        let params = parse_query_string("first%20name=Ada+Lovelace");
        assert_eq!(params["first name"], "Ada Lovelace");
    }

    #[test]
    fn test_utf8_escapes() {
        let params = parse_query_string("name=Jos%C3%A9");
        assert_eq!(params["name"], "José");
    }

    #[test]
    fn test_malformed_escape_drops_only_that_pair() {
        let params = parse_query_string("a=%zz&b=1&c=50%");
        assert!(!params.contains_key("a"));
        assert!(!params.contains_key("c"));
        assert_eq!(params["b"], "1");
    }

    #[test]
    fn test_invalid_utf8_drops_pair() {
        let params = parse_query_string("a=%FF&b=ok");
        assert!(!params.contains_key("a"));
        assert_eq!(params["b"], "ok");
    }

    #[test]
    fn test_decoding_plain_ascii_is_idempotent() {
        for input in ["hello", "Ada", "3.14", "a-b_c.d~e"] {
            let once = url_decode(input).unwrap();
            let twice = url_decode(&once).unwrap();
            assert_eq!(once, input);
            assert_eq!(twice, once);
        }
    }
}
