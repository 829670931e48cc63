//! Domain error to HTTP response mapping.
//!
//! Single place where every `DomainError` variant is assigned its status
//! and stable code. Storage causes are logged here and replaced with a
//! generic message; driver details never reach a client.

use actix_web::HttpResponse;

use todo_core::errors::{AuthError, DomainError, TokenError};

use crate::dto::ErrorResponse;

/// Convert a domain error into the JSON error envelope.
pub fn error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(
                ErrorResponse::new("INVALID_CREDENTIALS", "ユーザー名またはパスワードが正しくありません"),
            ),
            AuthError::UsernameExists => HttpResponse::Conflict().json(ErrorResponse::with_field(
                "USERNAME_EXISTS",
                "このユーザー名は既に使用されています",
                "username",
                "このユーザー名は既に使用されています",
            )),
            AuthError::EmailExists => HttpResponse::Conflict().json(ErrorResponse::with_field(
                "EMAIL_EXISTS",
                "このメールアドレスは既に登録されています",
                "email",
                "このメールアドレスは既に登録されています",
            )),
            AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
                "USER_NOT_FOUND",
                "ユーザーが見つかりません",
            )),
            AuthError::CurrentPasswordIncorrect => {
                HttpResponse::Unauthorized().json(ErrorResponse::with_field(
                    "CURRENT_PASSWORD_INCORRECT",
                    "現在のパスワードが正しくありません",
                    "current_password",
                    "現在のパスワードが正しくありません",
                ))
            }
            AuthError::PasswordHashFailed => HttpResponse::InternalServerError().json(
                ErrorResponse::new("PASSWORD_HASH_FAILED", "パスワードの暗号化に失敗しました"),
            ),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::Malformed | TokenError::InvalidSignature | TokenError::InvalidClaims => {
                HttpResponse::Unauthorized()
                    .json(ErrorResponse::new("TOKEN_INVALID", "無効なトークンです"))
            }
            TokenError::Expired => HttpResponse::Unauthorized().json(ErrorResponse::new(
                "TOKEN_EXPIRED",
                "トークンの有効期限が切れています",
            )),
            TokenError::Revoked => HttpResponse::Unauthorized().json(ErrorResponse::new(
                "TOKEN_REVOKED",
                "トークンは無効化されています",
            )),
            TokenError::RefreshInvalid => HttpResponse::Unauthorized().json(ErrorResponse::new(
                "REFRESH_INVALID",
                "リフレッシュトークンが無効です",
            )),
            TokenError::IssuanceFailed => HttpResponse::InternalServerError().json(
                ErrorResponse::new("TOKEN_ISSUANCE_FAILED", "トークンの発行に失敗しました"),
            ),
        },
        DomainError::Validation { fields } => HttpResponse::BadRequest().json(
            ErrorResponse::with_details("VALIDATION_FAILED", "バリデーションエラーです", fields.clone()),
        ),
        DomainError::TodoNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
            "TODO_NOT_FOUND",
            "Todoが見つかりません",
        )),
        DomainError::Storage { message } => {
            log::error!("storage error reached the HTTP layer: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "STORAGE_ERROR",
                "データベースエラーが発生しました",
            ))
        }
    }
}

/// 401 for requests that presented no token at all.
pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new("UNAUTHORIZED", "認証が必要です"))
}

/// 400 for logout without any token to revoke.
pub fn token_required_response() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "TOKEN_REQUIRED",
        "認証トークンが必要です",
    ))
}

/// 400 for bodies that are not well-formed JSON.
pub fn invalid_json_response() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_JSON", "無効なJSON形式です"))
}

/// 400 for due dates not in `YYYY-MM-DD`.
pub fn invalid_date_response() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "INVALID_DATE_FORMAT",
        "日付の形式が正しくありません。YYYY-MM-DD形式で入力してください",
    ))
}
