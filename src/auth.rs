//! 認証コラボレータ
//!
//! 現在のユーザーを同期的に読むだけの読み取り専用ポート。
//! セッション管理や権限の強制は行わない。

use litter_log_common::{User, UserRole};

/// 現在のユーザーを提供する抽象
pub trait AuthProvider {
    fn current_user(&self) -> Option<User>;
}

/// CLIフラグ・設定ファイルから決まる固定ユーザー
pub struct StaticAuth {
    user: Option<User>,
}

impl StaticAuth {
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    /// ID・表示名からユーザーを構成（IDが無ければ未ログイン）
    pub fn from_parts(user_id: Option<String>, user_name: Option<String>) -> Self {
        let user = user_id.map(|id| {
            let name = user_name.unwrap_or_else(|| id.clone());
            User {
                id,
                name,
                role: UserRole::User,
            }
        });
        Self { user }
    }
}

impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}
