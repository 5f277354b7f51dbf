//! UseCase: ユーザー登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterUserUseCase::execute() メソッド
//! - ユーザー登録処理（検証子の生成、一意性の保証）
//!
//! ### なぜこのテストが必要か
//! - 同じユーザー名の二重登録を防ぐ（パスワードが違っても不可）
//! - ストア障害が呼び出し元に伝播することを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザーの登録
//! - 異常系：使用済みユーザー名での登録試行、ストア障害

use std::sync::Arc;

use crate::domain::{PasswordHasher, StoreError, UserRecord, UserStore, Username};

use super::error::RegisterError;

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    /// ユーザーストア（データアクセス層の抽象化）
    users: Arc<dyn UserStore>,
    /// パスワードハッシュ化の能力（不透明な外部協調者）
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserUseCase {
    /// 新しい RegisterUserUseCase を作成
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// ユーザー登録を実行
    ///
    /// 平文パスワードはここで検証子に変換され、以降どの層も平文を
    /// 保持しません。一意性はストアの insert が原子的に保証します
    /// （check-then-act の競合なし）。
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 登録成功
    /// * `Err(RegisterError::UsernameTaken)` - ユーザー名が使用済み
    /// * `Err(RegisterError::Store)` - ストア障害
    pub async fn execute(&self, username: Username, password: &str) -> Result<(), RegisterError> {
        let password_hash = self.hasher.hash(password);
        let record = UserRecord::new(username.clone(), password_hash);

        self.users.insert(record).await.map_err(|e| match e {
            StoreError::AlreadyExists(_) => {
                RegisterError::UsernameTaken(username.as_str().to_string())
            }
            other => RegisterError::Store(other),
        })
    }
}
