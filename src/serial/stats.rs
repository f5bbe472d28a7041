// src/serial/stats.rs

//! チャネル診断カウンタ
//!
//! - 割り込みコンテキストからも呼べるよう、すべて Relaxed のアトミック操作
//! - カウンタは診断用途のみ（正しさの判定には使わない）

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use super::error::Direction;

/// チャネルごとの統計情報
#[derive(Debug)]
pub struct ChannelDiagnostics {
    bytes_transmitted: AtomicU64,
    bytes_received: AtomicU64,
    tx_overflows: AtomicU32,
    rx_overflows: AtomicU32,
    interrupts: AtomicU64,
    idle_tx_interrupts: AtomicU64,
}

/// 統計情報のスナップショット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub bytes_transmitted: u64,
    pub bytes_received: u64,
    pub tx_overflows: u32,
    pub rx_overflows: u32,
    pub interrupts: u64,
    /// 送信空き割り込みが来たが送るものがなかった回数（送信完了ごとに1回は正常）
    pub idle_tx_interrupts: u64,
}

impl ChannelStats {
    /// オーバーフロー合計
    #[inline]
    pub const fn total_overflows(&self) -> u32 {
        self.tx_overflows.saturating_add(self.rx_overflows)
    }
}

impl ChannelDiagnostics {
    pub const fn new() -> Self {
        Self {
            bytes_transmitted: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            tx_overflows: AtomicU32::new(0),
            rx_overflows: AtomicU32::new(0),
            interrupts: AtomicU64::new(0),
            idle_tx_interrupts: AtomicU64::new(0),
        }
    }

    /// データレジスタへ書き込んだ1バイトを記録
    #[inline]
    pub fn record_transmitted(&self) {
        self.bytes_transmitted.fetch_add(1, Ordering::Relaxed);
    }

    /// データレジスタから読んだ1バイトを記録
    #[inline]
    pub fn record_received(&self) {
        self.bytes_received.fetch_add(1, Ordering::Relaxed);
    }

    /// オーバーフローを記録
    #[inline]
    pub fn record_overflow(&self, direction: Direction) {
        let counter = match direction {
            Direction::Tx => &self.tx_overflows,
            Direction::Rx => &self.rx_overflows,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_interrupt(&self) {
        self.interrupts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_idle_tx(&self) {
        self.idle_tx_interrupts.fetch_add(1, Ordering::Relaxed);
    }

    /// スナップショットを取得
    pub fn snapshot(&self) -> ChannelStats {
        ChannelStats {
            bytes_transmitted: self.bytes_transmitted.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            tx_overflows: self.tx_overflows.load(Ordering::Relaxed),
            rx_overflows: self.rx_overflows.load(Ordering::Relaxed),
            interrupts: self.interrupts.load(Ordering::Relaxed),
            idle_tx_interrupts: self.idle_tx_interrupts.load(Ordering::Relaxed),
        }
    }

    /// すべてのカウンタをゼロに戻す
    pub fn reset(&self) {
        self.bytes_transmitted.store(0, Ordering::Relaxed);
        self.bytes_received.store(0, Ordering::Relaxed);
        self.tx_overflows.store(0, Ordering::Relaxed);
        self.rx_overflows.store(0, Ordering::Relaxed);
        self.interrupts.store(0, Ordering::Relaxed);
        self.idle_tx_interrupts.store(0, Ordering::Relaxed);
    }
}

impl Default for ChannelDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}
