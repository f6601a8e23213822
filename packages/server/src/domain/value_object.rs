//! Value Object 定義
//!
//! Room の状態を構成する不変の値を定義します。
//! 盤面のマーカーや勝者の値はクライアントが決めるもので、サーバーは解釈しません。

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// 盤面のマス数
pub const BOARD_CELLS: usize = 9;

/// Room の識別子
///
/// 最初に join したクライアントが決める不透明な文字列。空文字列も有効な ID として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// プレイヤーの表示名（join 時に指定され、以後変更されない）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続ごとに払い出される識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい ConnectionId をランダムに生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 座席ラベル（"x" または "o"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    X,
    O,
}

impl Seat {
    /// 座席の割り当て順
    pub const ALL: [Seat; 2] = [Seat::X, Seat::O];

    pub fn as_str(&self) -> &'static str {
        match self {
            Seat::X => "x",
            Seat::O => "o",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid seat label: '{0}'")]
pub struct InvalidSeat(pub String);

impl FromStr for Seat {
    type Err = InvalidSeat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Seat::X),
            "o" => Ok(Seat::O),
            other => Err(InvalidSeat(other.to_string())),
        }
    }
}

/// 現在の手番
///
/// クライアントが送った座席ラベルをそのまま保持して中継する。"x" / "o" 以外の値も受け付け、
/// その場合はどの座席の手番でもない（手番の表示名は None）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Turn(String);

impl Turn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// 手番が指す座席（座席ラベルでなければ None）
    pub fn seat(&self) -> Option<Seat> {
        self.0.parse().ok()
    }
}

impl From<Seat> for Turn {
    fn from(seat: Seat) -> Self {
        Self(seat.as_str().to_string())
    }
}

impl PartialEq<Seat> for Turn {
    fn eq(&self, other: &Seat) -> bool {
        self.0 == other.as_str()
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// マスに置かれたマーカー（中身は解釈しない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 9 マスの盤面
///
/// クライアントはマスを位置で指定するため、長さ 9 とインデックスの意味を保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Option<Marker>; BOARD_CELLS]);

impl Board {
    /// 全てのマスが空の盤面
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Marker>; BOARD_CELLS]) -> Self {
        Self(cells)
    }

    /// 任意の長さのマス列から盤面を作る
    ///
    /// 10 マス目以降は捨て、足りないマスは空とする。
    pub fn from_partial(cells: impl IntoIterator<Item = Option<Marker>>) -> Self {
        let mut board = Self::empty();
        for (slot, cell) in board.0.iter_mut().zip(cells) {
            *slot = cell;
        }
        board
    }

    pub fn into_cells(self) -> [Option<Marker>; BOARD_CELLS] {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// 勝者の値
///
/// 「勝者なし」「引き分け」「勝った座席」などの意味はクライアントが決める。
/// サーバーは受け取った JSON 値をそのまま保持・中継する（`null` は値なし）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Winner(serde_json::Value);

impl Winner {
    /// 値なし
    pub fn absent() -> Self {
        Self(serde_json::Value::Null)
    }

    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
