//! The packet queue.

use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;
use xbeewire_packet::{Addr64, ApiPacket};

use crate::error::{QueueError, Result};

/// Capacity of [`PacketQueue::default`].
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded FIFO queue of decoded packets, shared between the reader thread
/// and any number of consumers.
///
/// Consumers pop in arrival order, optionally filtered by a predicate and
/// optionally blocking until a matching packet arrives or a timeout
/// expires. A zero timeout never blocks. When the queue is full, pushing
/// silently drops the oldest entry; producers never block and never fail.
#[derive(Debug)]
pub struct PacketQueue {
    inner: Mutex<VecDeque<ApiPacket>>,
    available: Condvar,
    capacity: usize,
}

impl PacketQueue {
    /// Queue with the default capacity of [`DEFAULT_CAPACITY`] packets.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(DEFAULT_CAPACITY)),
            available: Condvar::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Queue holding at most `capacity` packets.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity(capacity));
        }
        Ok(Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            available: Condvar::new(),
            capacity,
        })
    }

    // Packet contents are owned values; a holder panicking mid-operation
    // cannot leave the deque inconsistent, so a poisoned lock keeps serving.
    fn queue(&self) -> MutexGuard<'_, VecDeque<ApiPacket>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a packet, evicting the oldest entry when full.
    pub fn push(&self, packet: ApiPacket) {
        let mut queue = self.queue();
        if queue.len() == self.capacity {
            if let Some(dropped) = queue.pop_front() {
                debug!(frame_type = %dropped.frame_type(), "queue full, dropping oldest packet");
            }
        }
        queue.push_back(packet);
        drop(queue);
        self.available.notify_all();
    }

    /// Removes and returns the oldest packet.
    ///
    /// Blocks up to `timeout` for a packet to arrive; a zero timeout
    /// returns immediately.
    pub fn pop_first(&self, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(|_| true, timeout)
    }

    /// Removes and returns the oldest packet matching `predicate`.
    ///
    /// Entries the predicate rejects stay queued, including ones older
    /// than the match. Blocks up to `timeout` until a matching packet is
    /// present; a zero timeout checks once and returns. Wakeups re-derive
    /// the remaining time from an absolute deadline, so neither spurious
    /// wakeups nor non-matching arrivals extend the wait.
    pub fn pop_first_matching<F>(&self, mut predicate: F, timeout: Duration) -> Option<ApiPacket>
    where
        F: FnMut(&ApiPacket) -> bool,
    {
        let mut queue = self.queue();
        if let Some(packet) = take_first(&mut queue, &mut predicate) {
            return Some(packet);
        }
        if timeout.is_zero() {
            return None;
        }

        // A deadline past the clock's range never expires.
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => Duration::MAX,
            };
            if remaining.is_zero() {
                return None;
            }
            let (guard, _) = self
                .available
                .wait_timeout(queue, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            queue = guard;
            if let Some(packet) = take_first(&mut queue, &mut predicate) {
                return Some(packet);
            }
        }
    }

    /// Oldest packet carrying received application data.
    pub fn pop_data_packet(&self, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(ApiPacket::is_data_packet, timeout)
    }

    /// Oldest explicit-addressing data packet.
    pub fn pop_explicit_data_packet(&self, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(ApiPacket::is_explicit_data_packet, timeout)
    }

    /// Oldest packet with data received over an IPv4 socket.
    pub fn pop_ip_data_packet(&self, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(ApiPacket::is_ip_data_packet, timeout)
    }

    /// Oldest packet with data received over an IPv6 socket.
    pub fn pop_ipv6_data_packet(&self, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(ApiPacket::is_ipv6_data_packet, timeout)
    }

    /// Oldest packet reporting `addr` as its 64-bit source.
    pub fn pop_packet_from(&self, addr: Addr64, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(|p| p.source_addr64() == Some(addr), timeout)
    }

    /// Oldest data packet from `addr`.
    pub fn pop_data_packet_from(&self, addr: Addr64, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(
            |p| p.is_data_packet() && p.source_addr64() == Some(addr),
            timeout,
        )
    }

    /// Oldest explicit-addressing data packet from `addr`.
    pub fn pop_explicit_data_packet_from(
        &self,
        addr: Addr64,
        timeout: Duration,
    ) -> Option<ApiPacket> {
        self.pop_first_matching(
            |p| p.is_explicit_data_packet() && p.source_addr64() == Some(addr),
            timeout,
        )
    }

    /// Oldest IPv4 data packet from `addr`.
    pub fn pop_ip_data_packet_from(&self, addr: Ipv4Addr, timeout: Duration) -> Option<ApiPacket> {
        self.pop_first_matching(
            |p| p.is_ip_data_packet() && p.source_ip() == Some(addr),
            timeout,
        )
    }

    /// Discards every queued packet.
    pub fn clear(&self) {
        self.queue().clear();
    }

    /// Number of queued packets.
    pub fn len(&self) -> usize {
        self.queue().len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    /// Maximum number of packets held before eviction starts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PacketQueue {
    fn default() -> Self {
        Self::new()
    }
}

fn take_first<F>(queue: &mut VecDeque<ApiPacket>, predicate: &mut F) -> Option<ApiPacket>
where
    F: FnMut(&ApiPacket) -> bool,
{
    let index = queue.iter().position(|packet| predicate(packet))?;
    queue.remove(index)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use xbeewire_packet::common::{ModemStatus, Receive};
    use xbeewire_packet::ip::RxIpv4;
    use xbeewire_packet::{Addr16, IpProtocol, ReceiveOptions};

    use super::*;

    const ZERO: Duration = Duration::ZERO;

    fn receive_from(addr: u64, data: &[u8]) -> ApiPacket {
        ApiPacket::Receive(Receive::new(
            Addr64::new(addr),
            Addr16::UNKNOWN,
            ReceiveOptions::empty(),
            data,
        ))
    }

    fn modem_status() -> ApiPacket {
        ApiPacket::ModemStatus(ModemStatus::new(0))
    }

    fn ip_data_from(last_octet: u8) -> ApiPacket {
        ApiPacket::RxIpv4(RxIpv4::new(
            Ipv4Addr::new(10, 0, 0, last_octet),
            80,
            49152,
            IpProtocol::Tcp,
            *b"ip",
        ))
    }

    #[test]
    fn pops_in_arrival_order() {
        let queue = PacketQueue::new();
        queue.push(receive_from(1, b"a"));
        queue.push(receive_from(2, b"b"));
        queue.push(receive_from(3, b"c"));

        for expected in [1u64, 2, 3] {
            let packet = queue.pop_first(ZERO).unwrap();
            assert_eq!(packet.source_addr64(), Some(Addr64::new(expected)));
        }
        assert!(queue.pop_first(ZERO).is_none());
    }

    #[test]
    fn full_queue_evicts_the_oldest() {
        let queue = PacketQueue::with_capacity(2).unwrap();
        queue.push(receive_from(1, b"a"));
        queue.push(receive_from(2, b"b"));
        queue.push(receive_from(3, b"c"));

        assert_eq!(queue.len(), 2);
        let first = queue.pop_first(ZERO).unwrap();
        assert_eq!(first.source_addr64(), Some(Addr64::new(2)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            PacketQueue::with_capacity(0),
            Err(QueueError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn filtered_pop_skips_but_keeps_non_matching_entries() {
        let queue = PacketQueue::new();
        queue.push(modem_status());
        queue.push(receive_from(1, b"a"));
        queue.push(modem_status());
        queue.push(receive_from(2, b"b"));

        let data = queue.pop_data_packet(ZERO).unwrap();
        assert_eq!(data.source_addr64(), Some(Addr64::new(1)));

        // The two status packets are still there, still in front.
        assert_eq!(queue.len(), 3);
        assert!(matches!(
            queue.pop_first(ZERO).unwrap(),
            ApiPacket::ModemStatus(_)
        ));
        assert!(matches!(
            queue.pop_first(ZERO).unwrap(),
            ApiPacket::ModemStatus(_)
        ));
        assert_eq!(
            queue.pop_first(ZERO).unwrap().source_addr64(),
            Some(Addr64::new(2))
        );
    }

    #[test]
    fn zero_timeout_never_blocks() {
        let queue = PacketQueue::new();
        let start = Instant::now();
        assert!(queue.pop_first(ZERO).is_none());
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn timeout_expires_when_nothing_matches() {
        let queue = PacketQueue::new();
        queue.push(modem_status());

        let start = Instant::now();
        let result = queue.pop_data_packet(Duration::from_millis(100));
        assert!(result.is_none());
        assert!(start.elapsed() >= Duration::from_millis(100));
        // The non-matching packet was not consumed by the wait.
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn blocked_consumer_wakes_on_push() {
        let queue = Arc::new(PacketQueue::new());
        let producer = Arc::clone(&queue);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            producer.push(receive_from(7, b"late"));
        });

        let start = Instant::now();
        let packet = queue.pop_first(Duration::from_secs(5)).unwrap();
        assert_eq!(packet.source_addr64(), Some(Addr64::new(7)));
        // Woke on arrival, long before the timeout.
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }

    #[test]
    fn consumer_ignores_non_matching_arrivals_while_waiting() {
        let queue = Arc::new(PacketQueue::new());
        let producer = Arc::clone(&queue);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.push(modem_status());
            thread::sleep(Duration::from_millis(20));
            producer.push(receive_from(9, b"yes"));
        });

        let packet = queue.pop_data_packet(Duration::from_secs(5)).unwrap();
        assert_eq!(packet.source_addr64(), Some(Addr64::new(9)));
        assert_eq!(queue.len(), 1);
        handle.join().unwrap();
    }

    #[test]
    fn address_filters_select_the_right_source() {
        let queue = PacketQueue::new();
        queue.push(receive_from(0xAA, b"a"));
        queue.push(receive_from(0xBB, b"b"));
        queue.push(ip_data_from(5));
        queue.push(ip_data_from(6));

        let from_bb = queue.pop_data_packet_from(Addr64::new(0xBB), ZERO).unwrap();
        assert_eq!(from_bb.source_addr64(), Some(Addr64::new(0xBB)));

        let from_ip = queue
            .pop_ip_data_packet_from(Ipv4Addr::new(10, 0, 0, 6), ZERO)
            .unwrap();
        assert_eq!(from_ip.source_ip(), Some(Ipv4Addr::new(10, 0, 0, 6)));

        assert!(queue.pop_packet_from(Addr64::new(0xCC), ZERO).is_none());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn clear_empties_the_queue() {
        let queue = PacketQueue::new();
        queue.push(modem_status());
        queue.push(modem_status());
        assert_eq!(queue.len(), 2);
        assert!(!queue.is_empty());

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), DEFAULT_CAPACITY);
    }
}
