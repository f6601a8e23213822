//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;

use super::{RoomId, RoomSession};

/// Room Repository trait（RoomSession の Registry）
///
/// ## ロックの規律
///
/// 実装は自分のマップのロックを検索・挿入・削除の間だけ保持し、
/// そのロックを保持したまま RoomSession のロックを取ってはならない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// RoomSession を取得し、存在しなければ（または閉じていれば）新しく作成して登録
    ///
    /// 同じ ID に対する並行呼び出しでも、作成される RoomSession は 1 つだけ。
    async fn get_or_create(&self, room_id: &RoomId) -> Arc<RoomSession>;

    /// RoomSession を取得
    async fn find(&self, room_id: &RoomId) -> Option<Arc<RoomSession>>;

    /// 登録されているのが `session` と同じインスタンスの場合だけ削除（冪等）
    async fn remove(&self, room_id: &RoomId, session: &Arc<RoomSession>);

    /// 登録されている全ての RoomSession（Room ID 順）
    async fn list(&self) -> Vec<Arc<RoomSession>>;
}
