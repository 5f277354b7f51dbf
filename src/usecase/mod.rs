//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod authenticate_user;
pub mod error;
pub mod register_user;

pub use authenticate_user::AuthenticateUserUseCase;
pub use error::{AuthError, RegisterError};
pub use register_user::RegisterUserUseCase;
