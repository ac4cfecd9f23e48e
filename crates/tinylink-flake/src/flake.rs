use crate::{
    clock::{Clock, SystemClock},
    error::Error,
    FlakeId,
};
use jiff::Timestamp;
use std::sync::Mutex;
use typed_builder::TypedBuilder;

const TICK_MILLIS: i64 = 10;
const MAX_TIMESTAMP_TICKS: u64 = (1_u64 << 39) - 1;
const MAX_SEQUENCE: u8 = u8::MAX;

/// Configures a Flake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct FlakeSettings {
    /// Identifier of this instance; must be distinct among concurrently
    /// running instances. Reusing an identifier is not detectable here and
    /// silently raises the collision probability downstream.
    #[builder]
    pub machine_id: u16,
    /// Custom epoch used as the zero point for the 39-bit timestamp field.
    ///
    /// Flake math runs at 10 ms tick precision; sub-tick detail is
    /// intentionally not modeled in the timestamp field.
    #[builder]
    pub start_epoch: Timestamp,
}

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: Option<Timestamp>,
    sequence: u8,
}

/// Flake ID generator with Sonyflake-style wait-on-overflow semantics.
pub struct Flake<C: Clock> {
    start_time: Timestamp,
    machine_id: u16,
    clock: C,
    state: Mutex<GeneratorState>,
}

fn tick_of(timestamp: Timestamp) -> i64 {
    timestamp.as_millisecond() / TICK_MILLIS
}

impl Flake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: FlakeSettings) -> Result<Self, Error> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Flake<C> {
    fn with_clock(settings: FlakeSettings, clock: C) -> Result<Self, Error> {
        let now = clock.now();
        if settings.start_epoch > now {
            return Err(Error::EpochAhead {
                epoch: settings.start_epoch,
                now,
            });
        }

        Ok(Self {
            start_time: settings.start_epoch,
            machine_id: settings.machine_id,
            clock,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    /// Generates the next unique FlakeId.
    ///
    /// Correctness strategy (matching Sonyflake behavior):
    /// - if the per-tick sequence is exhausted, wait for the next tick
    /// - if the clock moves backward, wait until the clock catches up
    pub fn next_id(&self) -> Result<FlakeId, Error> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let mut now = self.clock.now();

        match state.last_timestamp {
            None => {
                // First call: sequence starts at 0 (already the default).
                state.sequence = 0;
            }
            Some(last) => {
                if now < last {
                    // Clock moved backward — block until we've caught up to
                    // the last timestamp used. Without this, two calls could
                    // produce the same (timestamp, sequence, machine_id)
                    // triple.
                    self.clock.wait_until(last);
                    now = self.clock.now();
                }

                if tick_of(now) == tick_of(last) {
                    if state.sequence < MAX_SEQUENCE {
                        state.sequence += 1;
                    } else {
                        // Per-tick sequence exhausted: wait for the next tick
                        // boundary, then reset so we start fresh.
                        let next_tick =
                            Timestamp::from_millisecond((tick_of(last) + 1) * TICK_MILLIS)
                                .expect("next tick is a valid timestamp");
                        self.clock.wait_until(next_tick);
                        now = self.clock.now();
                        state.sequence = 0;
                    }
                } else {
                    // Entered a new tick: the sequence counter resets.
                    state.sequence = 0;
                }
            }
        }

        // Ticks elapsed since the custom epoch, used as the timestamp field.
        let elapsed = tick_of(now) - tick_of(self.start_time);
        if elapsed as u64 > MAX_TIMESTAMP_TICKS {
            return Err(Error::OverTimeLimit);
        }

        let id = FlakeId::new()
            .with_timestamp(elapsed as u64)
            .with_sequence(state.sequence)
            .with_machine_id(self.machine_id);

        state.last_timestamp = Some(now);

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_clock::TestClock;

    fn make_generator(machine_id: u16, clock_millis: i64) -> Flake<TestClock> {
        let epoch = Timestamp::from_millisecond(0).unwrap();
        let settings = FlakeSettings::builder()
            .machine_id(machine_id)
            .start_epoch(epoch)
            .build();
        let clock = TestClock::new(Timestamp::from_millisecond(clock_millis).unwrap());
        Flake::with_clock(settings, clock).unwrap()
    }

    #[test]
    fn first_id_has_sequence_zero() {
        let gen = make_generator(0, 1_000);
        let id = gen.next_id().unwrap();
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn same_tick_increments_sequence() {
        let gen = make_generator(0, 1_000);
        let id0 = gen.next_id().unwrap();
        let id1 = gen.next_id().unwrap();
        let id2 = gen.next_id().unwrap();
        assert_eq!(id0.sequence(), 0);
        assert_eq!(id1.sequence(), 1);
        assert_eq!(id2.sequence(), 2);
    }

    #[test]
    fn sequence_overflow_advances_clock() {
        let gen = make_generator(0, 1_000);
        // Exhaust all 256 IDs allocated to tick 100.
        for _ in 0..=255 {
            gen.next_id().unwrap();
        }
        // The 257th call must wait for tick 101; sequence resets to 0.
        let id = gen.next_id().unwrap();
        assert_eq!(id.sequence(), 0);
        assert_eq!(id.timestamp(), 101); // elapsed = tick 101 - epoch tick 0
    }

    #[test]
    fn machine_id_is_embedded() {
        let gen = make_generator(42, 1_000);
        let id = gen.next_id().unwrap();
        assert_eq!(id.machine_id(), 42);
    }

    #[test]
    fn timestamp_field_reflects_elapsed_ticks() {
        let gen = make_generator(0, 5_000);
        let id = gen.next_id().unwrap();
        // elapsed = tick 500 - epoch tick 0
        assert_eq!(id.timestamp(), 500);
    }

    #[test]
    fn ids_are_ordered_across_ticks() {
        let epoch = Timestamp::from_millisecond(0).unwrap();
        let settings = FlakeSettings::builder()
            .machine_id(u16::MAX)
            .start_epoch(epoch)
            .build();
        let clock = TestClock::new(Timestamp::from_millisecond(1_000).unwrap());
        let handle = clock.clone();
        let gen = Flake::with_clock(settings, clock).unwrap();

        let first = gen.next_id().unwrap();
        handle.wait_until(Timestamp::from_millisecond(1_010).unwrap());
        let second = gen.next_id().unwrap();

        assert!(second.as_u64() > first.as_u64());
    }

    #[test]
    fn epoch_ahead_of_clock_is_rejected() {
        let epoch = Timestamp::from_millisecond(2_000).unwrap();
        let settings = FlakeSettings::builder()
            .machine_id(0)
            .start_epoch(epoch)
            .build();
        let clock = TestClock::new(Timestamp::from_millisecond(1_000).unwrap());
        let err = Flake::with_clock(settings, clock).err();
        assert!(matches!(err, Some(Error::EpochAhead { .. })));
    }

    #[test]
    fn overtime_limit_returns_error() {
        let epoch = Timestamp::from_millisecond(0).unwrap();
        let settings = FlakeSettings::builder()
            .machine_id(0)
            .start_epoch(epoch)
            .build();
        // Place the clock one tick past the 39-bit timestamp limit.
        let over_limit = (MAX_TIMESTAMP_TICKS as i64 + 1) * TICK_MILLIS;
        let clock = TestClock::new(Timestamp::from_millisecond(over_limit).unwrap());
        let gen = Flake::with_clock(settings, clock).unwrap();
        assert_eq!(gen.next_id(), Err(Error::OverTimeLimit));
    }
}
