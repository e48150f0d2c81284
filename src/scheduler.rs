use instant::Instant;

use crate::world::PetWorld;

/// Target simulation tick rate (seconds per fast tick).
pub const TICK_RATE: f64 = 0.016;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// Fast ticks per behavior decision (~10 s).
pub const SLOW_TICK_EVERY: u64 = 625;
/// Fast ticks per newborn growth step (~30 min).
pub const GROWTH_TICK_EVERY: u64 = 112_500;
/// How often to log tick stats (seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Tick timing
// ---------------------------------------------------------------------------

struct TickStats {
    tick_count: u64,
    ticks_since_log: u64,
    last_log_time: Instant,
    pump_time_sum: f64,
    pump_time_min: f64,
    pump_time_max: f64,
    pumps_since_log: u32,
}

impl TickStats {
    fn new() -> Self {
        Self {
            tick_count: 0,
            ticks_since_log: 0,
            last_log_time: Instant::now(),
            pump_time_sum: 0.0,
            pump_time_min: f64::MAX,
            pump_time_max: 0.0,
            pumps_since_log: 0,
        }
    }

    fn record_pump(&mut self, elapsed: f64, ticks: u64) {
        self.tick_count += ticks;
        self.ticks_since_log += ticks;
        self.pumps_since_log += 1;
        self.pump_time_sum += elapsed;
        self.pump_time_min = self.pump_time_min.min(elapsed);
        self.pump_time_max = self.pump_time_max.max(elapsed);

        let since_log = self.last_log_time.elapsed().as_secs_f64();
        if since_log >= STATS_LOG_INTERVAL {
            let avg_ms = (self.pump_time_sum / self.pumps_since_log as f64) * 1000.0;
            log::info!(
                "sim: {:.0} ticks/s | pump avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total ticks: {}",
                self.ticks_since_log as f64 / since_log.max(f64::EPSILON),
                avg_ms,
                self.pump_time_min * 1000.0,
                self.pump_time_max * 1000.0,
                self.tick_count,
            );
            self.last_log_time = Instant::now();
            self.pump_time_sum = 0.0;
            self.pump_time_min = f64::MAX;
            self.pump_time_max = 0.0;
            self.pumps_since_log = 0;
            self.ticks_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Fixed-timestep cooperative driver.
///
/// The world holds no timers of its own; this is the single external
/// scheduler that converts wall-clock time into fast ticks and interleaves
/// the slow behavior and growth cadences at their tick counts. Nothing here
/// runs concurrently: one pump call executes every due tick to completion on
/// the calling thread.
pub struct Driver {
    accumulator: f64,
    tick_count: u64,
    stats: TickStats,
}

impl Driver {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            tick_count: 0,
            stats: TickStats::new(),
        }
    }

    /// Advance the world by `dt` seconds of wall-clock time. Returns the
    /// number of fast ticks that ran.
    pub fn pump(&mut self, world: &mut PetWorld, dt: f64, env_load: f32) -> u64 {
        let start = Instant::now();

        self.accumulator += dt;
        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        let mut ran = 0;
        while self.accumulator >= TICK_RATE {
            world.fast_tick();
            self.tick_count += 1;

            if self.tick_count % SLOW_TICK_EVERY == 0 {
                world.slow_tick(env_load);
            }
            if self.tick_count % GROWTH_TICK_EVERY == 0 {
                world.growth_tick();
            }

            self.accumulator -= TICK_RATE;
            ran += 1;
        }

        if ran > 0 {
            self.stats.record_pump(start.elapsed().as_secs_f64(), ran);
        }
        ran
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
