//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::StoreError;

/// ユーザー登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// ユーザー名が既に使用されている
    #[error("username '{0}' already exists")]
    UsernameTaken(String),

    /// ユーザーストアへの書き込みに失敗した
    #[error(transparent)]
    Store(StoreError),
}

/// Authentication failure.
///
/// Unknown usernames and wrong passwords are deliberately collapsed into
/// the same `InvalidCredentials` variant so the two outcomes are
/// indistinguishable to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 不正な認証情報（未知のユーザー、またはパスワード不一致）
    #[error("invalid username or password")]
    InvalidCredentials,

    /// ユーザーストアの参照に失敗した
    #[error(transparent)]
    Store(#[from] StoreError),
}
