//! UseCase: 認証処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AuthenticateUserUseCase::execute() メソッド
//! - 認証処理（検証子との照合、失敗理由の秘匿）
//!
//! ### なぜこのテストが必要か
//! - 保存された検証子に対してのみ認証が成功することを保証
//! - 未知のユーザーとパスワード不一致が呼び出し元から区別できない
//!   ことを保証（ユーザー列挙攻撃の防止）
//!
//! ### どのような状況を想定しているか
//! - 正常系：正しい認証情報でのログイン
//! - 異常系：パスワード不一致、未知のユーザー、ストア障害

use std::sync::Arc;

use crate::domain::{PasswordHasher, UserStore, Username};

use super::error::AuthError;

/// 認証のユースケース
///
/// HTTP の `POST /login` と WebSocket セッションの認証フェーズの両方が
/// このユースケースを使用します。
pub struct AuthenticateUserUseCase {
    /// ユーザーストア（データアクセス層の抽象化）
    users: Arc<dyn UserStore>,
    /// パスワード検証の能力（不透明な外部協調者）
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthenticateUserUseCase {
    /// 新しい AuthenticateUserUseCase を作成
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// 認証を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 認証成功
    /// * `Err(AuthError::InvalidCredentials)` - 未知のユーザー、または
    ///   パスワード不一致（両者は区別できない）
    /// * `Err(AuthError::Store)` - ストア障害
    pub async fn execute(&self, username: &Username, password: &str) -> Result<(), AuthError> {
        let record = self.users.find(username).await?;

        match record {
            Some(record) if self.hasher.verify(password, &record.password_hash) => Ok(()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
