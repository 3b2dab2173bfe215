//! Network throughput per interface.
//!
//! Byte and packet counters are differenced against the previous tick by
//! interface name. The primary interface is either the configured one or,
//! in `auto` mode, the non-loopback interface moving the most traffic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{compute_all, counter_rate, RateContext, RateResult, RateSource};
use crate::snapshot::{InterfaceSample, NetworkSnapshot};

/// Preferred-interface value requesting automatic selection.
pub const AUTO_INTERFACE: &str = "auto";

/// Raw counters carried to the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceCounters {
    /// Bytes received.
    pub rx_bytes: u64,
    /// Bytes sent.
    pub tx_bytes: u64,
    /// Packets received.
    pub rx_packets: u64,
    /// Packets sent.
    pub tx_packets: u64,
}

/// Calculated rates for one interface.
#[derive(Debug, Clone, PartialEq)]
pub struct NetRates {
    /// Interface name.
    pub name: String,
    /// Download rate.
    pub rx: RateResult,
    /// Upload rate.
    pub tx: RateResult,
    /// Receive packets per second.
    pub rx_packets_per_sec: f64,
    /// Transmit packets per second.
    pub tx_packets_per_sec: f64,
    /// Bytes received since boot.
    pub rx_total: u64,
    /// Bytes transmitted since boot.
    pub tx_total: u64,
}

impl NetRates {
    /// Combined rx + tx bytes/sec.
    #[must_use]
    pub fn traffic(&self) -> f64 {
        self.rx.value + self.tx.value
    }

    /// True for loopback devices (`lo`, `lo0`).
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        is_loopback(&self.name)
    }
}

/// Network throughput for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkUsage {
    /// All interfaces, in snapshot order.
    pub interfaces: Vec<NetRates>,
    /// Index of the primary interface in `interfaces`.
    pub primary: Option<usize>,
    /// Download rate summed over non-loopback interfaces.
    pub total_rx: RateResult,
    /// Upload rate summed over non-loopback interfaces.
    pub total_tx: RateResult,
}

impl NetworkUsage {
    /// The primary interface.
    #[must_use]
    pub fn primary(&self) -> Option<&NetRates> {
        self.primary.and_then(|i| self.interfaces.get(i))
    }

    /// Non-loopback interfaces other than the primary, busiest first.
    #[must_use]
    pub fn secondary(&self, max: usize) -> Vec<&NetRates> {
        let mut rest: Vec<&NetRates> = self
            .interfaces
            .iter()
            .enumerate()
            .filter(|(i, n)| Some(*i) != self.primary && !n.is_loopback())
            .map(|(_, n)| n)
            .collect();
        rest.sort_by(|a, b| b.traffic().total_cmp(&a.traffic()));
        rest.truncate(max);
        rest
    }
}

impl RateSource for InterfaceSample {
    type Key = String;
    type Counters = InterfaceCounters;
    type Output = NetRates;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn counters(&self) -> Option<InterfaceCounters> {
        Some(InterfaceCounters {
            rx_bytes: self.rx_bytes,
            tx_bytes: self.tx_bytes,
            rx_packets: self.rx_packets,
            tx_packets: self.tx_packets,
        })
    }

    fn compute_rate(&self, previous: Option<&InterfaceCounters>, ctx: &RateContext) -> NetRates {
        let (rx, tx, rx_pps, tx_pps) = match previous {
            Some(prev) => (
                counter_rate(prev.rx_bytes, self.rx_bytes, ctx.interval),
                counter_rate(prev.tx_bytes, self.tx_bytes, ctx.interval),
                counter_rate(prev.rx_packets, self.rx_packets, ctx.interval),
                counter_rate(prev.tx_packets, self.tx_packets, ctx.interval),
            ),
            None => (0.0, 0.0, 0.0, 0.0),
        };

        NetRates {
            name: self.name.clone(),
            rx: RateResult::throughput(self.name.clone(), rx),
            tx: RateResult::throughput(self.name.clone(), tx),
            rx_packets_per_sec: rx_pps,
            tx_packets_per_sec: tx_pps,
            rx_total: self.rx_bytes,
            tx_total: self.tx_bytes,
        }
    }
}

/// Computes per-interface rates, totals and the primary interface.
pub fn compute_network(
    snapshot: &NetworkSnapshot,
    previous: &BTreeMap<String, InterfaceCounters>,
    ctx: &RateContext,
    preferred: &str,
) -> (NetworkUsage, BTreeMap<String, InterfaceCounters>) {
    let (interfaces, next) = compute_all(&snapshot.interfaces, previous, ctx);

    let (rx_sum, tx_sum) = interfaces
        .iter()
        .filter(|n| !n.is_loopback())
        .fold((0.0, 0.0), |(rx, tx), n| (rx + n.rx.value, tx + n.tx.value));

    let primary = select_primary(&interfaces, preferred);

    let usage = NetworkUsage {
        interfaces,
        primary,
        total_rx: RateResult::throughput("total", rx_sum),
        total_tx: RateResult::throughput("total", tx_sum),
    };
    (usage, next)
}

/// Picks the primary interface index.
///
/// A preferred name that exists wins. Otherwise the busiest non-loopback
/// interface is chosen (first on ties), falling back to the first interface.
#[must_use]
pub fn select_primary(interfaces: &[NetRates], preferred: &str) -> Option<usize> {
    if preferred != AUTO_INTERFACE && !preferred.is_empty() {
        if let Some(i) = interfaces.iter().position(|n| n.name == preferred) {
            return Some(i);
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, n) in interfaces.iter().enumerate() {
        if n.is_loopback() {
            continue;
        }
        match best {
            Some((_, traffic)) if n.traffic() <= traffic => {}
            _ => best = Some((i, n.traffic())),
        }
    }

    best.map(|(i, _)| i).or(if interfaces.is_empty() { None } else { Some(0) })
}

fn is_loopback(name: &str) -> bool {
    name == "lo" || name.strip_prefix("lo").is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}
