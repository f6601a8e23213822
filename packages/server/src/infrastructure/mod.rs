//! Infrastructure layer: ドメイン層の trait の具体的な実装とワイヤ形式

pub mod dto;
pub mod message_pusher;
pub mod repository;
