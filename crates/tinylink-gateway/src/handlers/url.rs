use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Form, FromRequest, Multipart, Path, Query, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tinylink_core::Token;
use tinylink_shortener::{Shortener, ShortenerError};
use tracing::debug;

const URL_FIELD: &str = "url";

/// Decoded `key=value` pairs, in order, repeats kept.
type FormPairs = Vec<(String, String)>;

fn first_url(pairs: FormPairs) -> Option<String> {
    pairs
        .into_iter()
        .find(|(key, _)| key == URL_FIELD)
        .map(|(_, value)| value)
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

async fn multipart_url(mut multipart: Multipart) -> Option<String> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(URL_FIELD) => {
                return match field.text().await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        debug!(error = %e, "unreadable multipart url field");
                        None
                    }
                };
            }
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => {
                debug!(error = %e, "malformed multipart body");
                return None;
            }
        }
    }
}

/// Reads the first `url` field of a urlencoded or multipart body.
async fn body_url(request: Request, state: &AppState) -> Option<String> {
    if is_multipart(&request) {
        match Multipart::from_request(request, state).await {
            Ok(multipart) => multipart_url(multipart).await,
            Err(rejection) => {
                debug!(error = %rejection, "no usable multipart body");
                None
            }
        }
    } else {
        match Form::<FormPairs>::from_request(request, state).await {
            Ok(Form(pairs)) => first_url(pairs),
            Err(rejection) => {
                debug!(error = %rejection, "no usable form body");
                None
            }
        }
    }
}

pub async fn shorten_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<FormPairs>, QueryRejection>,
    request: Request,
) -> Result<String> {
    let from_body = body_url(request, &state).await;
    let from_query = query.ok().and_then(|Query(pairs)| first_url(pairs));

    let long_url = from_body
        .filter(|url| !url.is_empty())
        .or(from_query)
        .filter(|url| !url.is_empty())
        .ok_or(AppError::MissingUrl)?;

    let mapping = state
        .shortener()
        .shorten(&long_url)
        .await
        .map_err(|e| match e {
            ShortenerError::EmptyUrl => AppError::MissingUrl,
            ShortenerError::Store(source) => AppError::StoreWrite(source),
        })?;

    Ok(mapping.token.to_url(state.base_url()))
}

pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

pub async fn expand_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // A malformed token can never have been stored.
    let token = Token::parse(&token).map_err(|e| {
        debug!(error = %e, "rejecting malformed token");
        AppError::NotFound
    })?;

    let long_url = state
        .shortener()
        .expand(&token)
        .await
        .map_err(|e| match e {
            ShortenerError::Store(source) => AppError::StoreRead(source),
            ShortenerError::EmptyUrl => AppError::NotFound,
        })?
        .ok_or(AppError::NotFound)?;

    let location =
        HeaderValue::from_str(&long_url).map_err(|_| AppError::InvalidRedirect(long_url))?;

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> FormPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_url_wins() {
        let form = pairs(&[("other", "x"), ("url", "a"), ("url", "b")]);
        assert_eq!(first_url(form).as_deref(), Some("a"));
    }

    #[test]
    fn first_url_missing() {
        assert!(first_url(pairs(&[("link", "a")])).is_none());
    }
}
