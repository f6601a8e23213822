//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用し、プロセスの生存期間だけ RoomSession を保持します。
//!
//! マップのロックは検索・挿入・削除の間だけ保持し、RoomSession のロックは取りません。
//! 閉じた RoomSession かどうかは atomic な `RoomSession::is_closed` で判定します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use sanmoku_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{RoomId, RoomRepository, RoomSession, Timestamp};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ID → RoomSession
    rooms: Mutex<HashMap<RoomId, Arc<RoomSession>>>,
    /// Room の作成時刻を決める時計
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// 登録されている Room の数
    pub async fn count_rooms(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(&self, room_id: &RoomId) -> Arc<RoomSession> {
        let mut rooms = self.rooms.lock().await;
        if let Some(session) = rooms.get(room_id)
            && !session.is_closed()
        {
            return session.clone();
        }

        let session = Arc::new(RoomSession::new(
            room_id.clone(),
            Timestamp::new(self.clock.now_jst_millis()),
        ));
        if rooms.insert(room_id.clone(), session.clone()).is_some() {
            tracing::debug!("Replaced closed room '{}'", room_id);
        }
        tracing::info!("Room '{}' created", room_id);
        session
    }

    async fn find(&self, room_id: &RoomId) -> Option<Arc<RoomSession>> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .filter(|session| !session.is_closed())
            .cloned()
    }

    async fn remove(&self, room_id: &RoomId, session: &Arc<RoomSession>) {
        let mut rooms = self.rooms.lock().await;
        let is_same = rooms
            .get(room_id)
            .is_some_and(|registered| Arc::ptr_eq(registered, session));
        if is_same {
            rooms.remove(room_id);
            tracing::info!("Room '{}' removed", room_id);
        }
    }

    async fn list(&self) -> Vec<Arc<RoomSession>> {
        let mut sessions: Vec<Arc<RoomSession>> = {
            let rooms = self.rooms.lock().await;
            rooms
                .values()
                .filter(|session| !session.is_closed())
                .cloned()
                .collect()
        };
        sessions.sort_by(|a, b| a.id().cmp(b.id()));
        sessions
    }
}
