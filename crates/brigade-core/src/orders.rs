//! The order book: outstanding orders, spawn cadence, and delivery matching.

use crate::event::{Event, EventBus};
use crate::fixed::Seconds;
use crate::id::{ItemTypeId, OrderId};
use crate::registry::Registry;
use crate::rng::SimRng;

/// Outstanding orders plus the spawn/match machinery.
///
/// Orders are drawn uniformly at random from the registry catalog on a
/// fixed cadence while the match is playing, capped at `max_waiting`. The
/// same catalog entry may be outstanding more than once.
#[derive(Debug)]
pub struct OrderBook {
    waiting: Vec<OrderId>,
    /// Counts down to the next spawn attempt; reloads on expiry whether or
    /// not an order actually spawned.
    spawn_timer: Seconds,
    spawn_period: Seconds,
    max_waiting: usize,
    delivered_count: u32,
    rng: SimRng,
}

impl OrderBook {
    pub fn new(spawn_period: Seconds, max_waiting: usize, seed: u64) -> Self {
        Self {
            waiting: Vec::new(),
            spawn_timer: spawn_period,
            spawn_period,
            max_waiting,
            delivered_count: 0,
            rng: SimRng::new(seed),
        }
    }

    /// Outstanding orders in spawn order.
    pub fn waiting(&self) -> &[OrderId] {
        &self.waiting
    }

    /// Cumulative successful deliveries this match.
    pub fn delivered_count(&self) -> u32 {
        self.delivered_count
    }

    pub fn spawn_timer(&self) -> Seconds {
        self.spawn_timer
    }

    pub fn rng_state(&self) -> u64 {
        self.rng.state()
    }

    /// Append an order directly, bypassing the cadence. For scripted
    /// scenarios and tests; normal play only spawns through `advance`.
    pub fn enqueue(&mut self, order: OrderId) {
        self.waiting.push(order);
    }

    /// Advance the spawn cadence. Spawns at most one order per expiry, and
    /// only while the match is playing and the pool is below its cap.
    pub fn advance(
        &mut self,
        dt: Seconds,
        playing: bool,
        registry: &Registry,
        events: &mut EventBus,
        tick: u64,
    ) {
        self.spawn_timer -= dt;
        if self.spawn_timer > Seconds::ZERO {
            return;
        }
        self.spawn_timer = self.spawn_period;

        if !playing || self.waiting.len() >= self.max_waiting || registry.order_count() == 0 {
            return;
        }

        let order = OrderId(self.rng.next_below(registry.order_count() as u32));
        self.waiting.push(order);
        events.emit(Event::OrderSpawned { order, tick });
    }

    /// Match a delivered plate's ingredient set against the outstanding
    /// orders, in spawn order.
    ///
    /// An order matches iff the two sets have equal size and every required
    /// ingredient type is present in the delivered set (plates hold no
    /// duplicates, so this is set equality). The first match is consumed;
    /// ties between set-equal duplicate orders go to the oldest.
    ///
    /// Returns the matched order, or `None` after emitting a failure event.
    pub fn deliver(
        &mut self,
        delivered: &[ItemTypeId],
        registry: &Registry,
        events: &mut EventBus,
        tick: u64,
    ) -> Option<OrderId> {
        for pos in 0..self.waiting.len() {
            let order = self.waiting[pos];
            let Some(def) = registry.order(order) else {
                continue;
            };
            if def.ingredients.len() != delivered.len() {
                continue;
            }
            let all_present = def.ingredients.iter().all(|t| delivered.contains(t));
            if all_present {
                self.waiting.remove(pos);
                self.delivered_count += 1;
                events.emit(Event::DeliverySucceeded { order, tick });
                return Some(order);
            }
        }

        events.emit(Event::DeliveryFailed { tick });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::fixed::Fixed64;
    use crate::registry::RegistryBuilder;

    fn secs(v: f64) -> Seconds {
        Fixed64::from_num(v)
    }

    struct Fixture {
        registry: Registry,
        bun: ItemTypeId,
        meat: ItemTypeId,
        lettuce: ItemTypeId,
    }

    fn fixture() -> Fixture {
        let mut b = RegistryBuilder::new();
        let bun = b.register_item("bun");
        let meat = b.register_item("meat");
        let lettuce = b.register_item("lettuce");
        b.register_order("burger", vec![bun, meat]);
        b.register_order("side_salad", vec![lettuce]);
        Fixture {
            registry: b.build().unwrap(),
            bun,
            meat,
            lettuce,
        }
    }

    fn book() -> OrderBook {
        OrderBook::new(secs(4.0), 4, 42)
    }

    #[test]
    fn spawns_only_while_playing() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();

        for _ in 0..10 {
            book.advance(secs(1.0), false, &f.registry, &mut events, 0);
        }
        assert!(book.waiting().is_empty());
        assert_eq!(events.buffered_count(EventKind::OrderSpawned), 0);

        for _ in 0..10 {
            book.advance(secs(1.0), true, &f.registry, &mut events, 0);
        }
        assert!(!book.waiting().is_empty());
    }

    #[test]
    fn spawn_cadence_period() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();

        // Timer strictly positive at 3 seconds elapsed; expires at 4.
        for _ in 0..3 {
            book.advance(secs(1.0), true, &f.registry, &mut events, 0);
        }
        assert!(book.waiting().is_empty());
        book.advance(secs(1.0), true, &f.registry, &mut events, 0);
        assert_eq!(book.waiting().len(), 1);
    }

    #[test]
    fn waiting_capped() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = OrderBook::new(secs(1.0), 4, 7);

        for _ in 0..50 {
            book.advance(secs(1.0), true, &f.registry, &mut events, 0);
        }
        assert_eq!(book.waiting().len(), 4);
        assert_eq!(events.total_emitted(EventKind::OrderSpawned), 4);
    }

    #[test]
    fn timer_reloads_even_when_gated() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();

        // Expire while not playing: nothing spawns, but the timer reloads.
        book.advance(secs(5.0), false, &f.registry, &mut events, 0);
        assert_eq!(book.spawn_timer(), secs(4.0));
    }

    #[test]
    fn match_is_order_independent() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();
        let burger = f.registry.order_id("burger").unwrap();
        book.waiting.push(burger);

        // {meat, bun} matches a {bun, meat} order.
        let matched = book.deliver(&[f.meat, f.bun], &f.registry, &mut events, 0);
        assert_eq!(matched, Some(burger));
        assert!(book.waiting().is_empty());
        assert_eq!(book.delivered_count(), 1);
    }

    #[test]
    fn extra_ingredient_fails() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();
        book.waiting.push(f.registry.order_id("burger").unwrap());

        let matched = book.deliver(&[f.bun, f.meat, f.lettuce], &f.registry, &mut events, 0);
        assert!(matched.is_none());
        assert_eq!(book.waiting().len(), 1);
        assert_eq!(book.delivered_count(), 0);
        assert_eq!(events.buffered_count(EventKind::DeliveryFailed), 1);
    }

    #[test]
    fn missing_ingredient_fails() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();
        book.waiting.push(f.registry.order_id("burger").unwrap());

        assert!(book.deliver(&[f.bun], &f.registry, &mut events, 0).is_none());
        assert_eq!(book.waiting().len(), 1);
    }

    #[test]
    fn failure_mutates_nothing() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();
        book.waiting.push(f.registry.order_id("side_salad").unwrap());

        let before = book.waiting().to_vec();
        book.deliver(&[f.bun], &f.registry, &mut events, 0);
        assert_eq!(book.waiting(), before.as_slice());
        assert_eq!(book.delivered_count(), 0);
    }

    #[test]
    fn first_match_wins_among_duplicates() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();
        let salad = f.registry.order_id("side_salad").unwrap();
        book.waiting.push(salad);
        book.waiting.push(salad);

        assert_eq!(
            book.deliver(&[f.lettuce], &f.registry, &mut events, 0),
            Some(salad)
        );
        // The duplicate stays outstanding.
        assert_eq!(book.waiting(), &[salad]);
    }

    #[test]
    fn skips_nonmatching_then_matches_later_entry() {
        let f = fixture();
        let mut events = EventBus::default();
        let mut book = book();
        let burger = f.registry.order_id("burger").unwrap();
        let salad = f.registry.order_id("side_salad").unwrap();
        book.waiting.push(burger);
        book.waiting.push(salad);

        assert_eq!(
            book.deliver(&[f.lettuce], &f.registry, &mut events, 0),
            Some(salad)
        );
        assert_eq!(book.waiting(), &[burger]);
    }

    #[test]
    fn deterministic_spawn_sequence() {
        let f = fixture();
        let mut ev_a = EventBus::default();
        let mut ev_b = EventBus::default();
        let mut a = OrderBook::new(secs(1.0), 10, 99);
        let mut b = OrderBook::new(secs(1.0), 10, 99);

        for _ in 0..8 {
            a.advance(secs(1.0), true, &f.registry, &mut ev_a, 0);
            b.advance(secs(1.0), true, &f.registry, &mut ev_b, 0);
        }
        assert_eq!(a.waiting(), b.waiting());
    }
}
