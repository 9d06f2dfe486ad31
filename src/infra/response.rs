use salvo::{http::StatusCode, writer::Json, Catcher, Depot, Piece, Request, Response};
use serde::{Deserialize, Serialize};

use crate::error::code::Code;

/// Uniform response body of every endpoint.
///
/// Application outcomes travel in `code`, the transport status is always
/// `200 OK`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Code::SUCCESS.code,
            message: Code::SUCCESS.message.into(),
            data: Some(data),
        }
    }

    pub fn error(code: Code, message: &str, data: Option<T>) -> Self {
        Self {
            code: code.code,
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize + Send> Piece for Envelope<T> {
    fn render(self, res: &mut Response) {
        res.render(Json(self));
        res.set_status_code(StatusCode::OK);
    }
}

/// Renders transport level failures, such as an unknown route, in the
/// envelope instead of salvo's default error page.
pub struct EnvelopeCatcher;

impl Catcher for EnvelopeCatcher {
    fn catch(&self, req: &Request, _depot: &Depot, res: &mut Response) -> bool {
        let code = match res.status_code() {
            Some(StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED) => Code::NOT_FOUND_ERROR,
            Some(status) if status.is_server_error() => Code::INTERNAL_ERROR,
            Some(status) if status.is_client_error() => Code::BAD_REQUEST_ERROR,
            _ => return false,
        };

        tracing::debug!(method = %req.method(), uri = %req.uri(), "no route answered");
        res.render(Envelope::<()>::error(code, code.message, None));
        true
    }
}
