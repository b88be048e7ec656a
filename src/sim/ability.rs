//! Player abilities
//!
//! All four abilities share one cooldown-gated timed-effect type,
//! [`TimedAbility`]. Each is configured with its own cooldown and optional
//! duration; pulse additionally draws from a [`ChargePool`].
//!
//! Every cooldown check is strict: an ability used at `t` is usable again only
//! once `now - t > cooldown`. An effect triggered at `t` with duration `d` is
//! active over `[t, t + d)`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    Dash,
    Focus,
    Pulse,
    Shrink,
}

impl AbilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityKind::Dash => "dash",
            AbilityKind::Focus => "focus",
            AbilityKind::Pulse => "pulse",
            AbilityKind::Shrink => "shrink",
        }
    }
}

/// Last-use timestamp plus a minimum gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub period_ms: f64,
    last_used_ms: Option<f64>,
}

impl Cooldown {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            last_used_ms: None,
        }
    }

    /// Never used, or strictly more than `period_ms` since last use
    pub fn ready(&self, now_ms: f64) -> bool {
        match self.last_used_ms {
            None => true,
            Some(t) => now_ms - t > self.period_ms,
        }
    }

    pub fn restart(&mut self, now_ms: f64) {
        self.last_used_ms = Some(now_ms);
    }

    pub fn last_used(&self) -> Option<f64> {
        self.last_used_ms
    }

    pub fn clear(&mut self) {
        self.last_used_ms = None;
    }
}

/// Cooldown-gated effect with an optional duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedAbility {
    pub kind: AbilityKind,
    pub cooldown: Cooldown,
    /// None for instantaneous abilities
    pub duration_ms: Option<f64>,
    active_until: Option<f64>,
}

impl TimedAbility {
    pub fn new(kind: AbilityKind, cooldown_ms: f64, duration_ms: Option<f64>) -> Self {
        Self {
            kind,
            cooldown: Cooldown::new(cooldown_ms),
            duration_ms,
            active_until: None,
        }
    }

    /// Effect currently running
    pub fn is_active(&self) -> bool {
        self.active_until.is_some()
    }

    /// When the running effect ends
    pub fn ends_at(&self) -> Option<f64> {
        self.active_until
    }

    /// Not running and cooldown elapsed
    pub fn ready(&self, now_ms: f64) -> bool {
        !self.is_active() && self.cooldown.ready(now_ms)
    }

    /// Activate if ready and `extra_gate` holds. Restarts the cooldown from
    /// `now_ms` (not from expiry).
    pub fn try_activate(&mut self, now_ms: f64, extra_gate: bool) -> bool {
        if !extra_gate || !self.ready(now_ms) {
            return false;
        }
        self.cooldown.restart(now_ms);
        self.active_until = self.duration_ms.map(|d| now_ms + d);
        log::debug!("{} activated at {:.0}ms", self.kind.as_str(), now_ms);
        true
    }

    /// End the effect once its window has passed. Returns true on the tick it ends.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.active_until {
            Some(end) if now_ms >= end => {
                self.active_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.cooldown.clear();
        self.active_until = None;
    }
}

/// Limited pulse uses that come back while pulse is left alone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargePool {
    pub charges: u32,
    pub max: u32,
    /// Quiet gap since the last use after which charges come back
    pub regen_ms: f64,
}

impl ChargePool {
    pub fn new(max: u32, regen_ms: f64) -> Self {
        Self {
            charges: max,
            max,
            regen_ms,
        }
    }

    pub fn available(&self) -> bool {
        self.charges > 0
    }

    pub fn consume(&mut self) {
        self.charges = self.charges.saturating_sub(1);
    }

    /// Regain one charge per call once `regen_ms` has passed since the last
    /// use (or when pulse was never used). Returns true when a charge was added.
    pub fn regenerate(&mut self, now_ms: f64, last_used_ms: Option<f64>) -> bool {
        if self.charges >= self.max {
            return false;
        }
        let due = last_used_ms.is_none_or(|last| now_ms - last > self.regen_ms);
        if due {
            self.charges += 1;
        }
        due
    }

    pub fn refill(&mut self) {
        self.charges = self.max;
    }
}

/// Per-ability readiness for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbilityReadiness {
    pub dash: bool,
    pub focus: bool,
    pub pulse: bool,
    pub shrink: bool,
    pub pulse_charges: u32,
}

/// The player's four abilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Abilities {
    pub dash: TimedAbility,
    pub focus: TimedAbility,
    pub pulse: TimedAbility,
    pub shrink: TimedAbility,
    pub pulse_charges: ChargePool,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            dash: TimedAbility::new(AbilityKind::Dash, DASH_COOLDOWN_MS, None),
            focus: TimedAbility::new(
                AbilityKind::Focus,
                FOCUS_COOLDOWN_MS,
                Some(FOCUS_DURATION_MS),
            ),
            pulse: TimedAbility::new(AbilityKind::Pulse, PULSE_COOLDOWN_MS, None),
            shrink: TimedAbility::new(
                AbilityKind::Shrink,
                SHRINK_COOLDOWN_MS,
                Some(SHRINK_DURATION_MS),
            ),
            pulse_charges: ChargePool::new(PULSE_MAX_CHARGES, PULSE_COOLDOWN_MS * 2.0),
        }
    }
}

impl Abilities {
    /// Enemy simulation speed: halved while focus runs
    pub fn time_factor(&self) -> f32 {
        if self.focus.is_active() {
            FOCUS_TIME_FACTOR
        } else {
            1.0
        }
    }

    pub fn focus_active(&self) -> bool {
        self.focus.is_active()
    }

    pub fn shrunk(&self) -> bool {
        self.shrink.is_active()
    }

    /// Pulse needs a charge on top of its cooldown
    pub fn try_pulse(&mut self, now_ms: f64) -> bool {
        let has_charge = self.pulse_charges.available();
        if self.pulse.try_activate(now_ms, has_charge) {
            self.pulse_charges.consume();
            true
        } else {
            false
        }
    }

    /// Expire timed effects and regenerate pulse charges. Returns the
    /// abilities whose effect ended this tick.
    pub fn update(&mut self, now_ms: f64) -> Vec<AbilityKind> {
        let mut expired = Vec::new();
        if self.focus.expire(now_ms) {
            expired.push(AbilityKind::Focus);
        }
        if self.shrink.expire(now_ms) {
            expired.push(AbilityKind::Shrink);
        }
        let last_pulse = self.pulse.cooldown.last_used();
        self.pulse_charges.regenerate(now_ms, last_pulse);
        expired
    }

    pub fn readiness(&self, now_ms: f64) -> AbilityReadiness {
        AbilityReadiness {
            dash: self.dash.ready(now_ms),
            focus: self.focus.ready(now_ms),
            pulse: self.pulse.ready(now_ms) && self.pulse_charges.available(),
            shrink: self.shrink.ready(now_ms),
            pulse_charges: self.pulse_charges.charges,
        }
    }

    /// Everything ready, pulse fully charged
    pub fn reset(&mut self) {
        self.dash.reset();
        self.focus.reset();
        self.pulse.reset();
        self.shrink.reset();
        self.pulse_charges.refill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_is_strict() {
        let mut cd = Cooldown::new(1000.0);
        assert!(cd.ready(0.0));
        cd.restart(500.0);
        assert!(!cd.ready(1500.0));
        assert!(cd.ready(1500.1));
    }

    #[test]
    fn test_focus_lifecycle() {
        let mut abilities = Abilities::default();
        assert!(abilities.focus.try_activate(1000.0, true));
        assert!(abilities.focus_active());
        assert_eq!(abilities.time_factor(), FOCUS_TIME_FACTOR);
        assert_eq!(abilities.focus.ends_at(), Some(4000.0));

        assert!(abilities.update(3999.0).is_empty());
        assert_eq!(abilities.update(4000.0), vec![AbilityKind::Focus]);
        assert!(!abilities.focus_active());
        assert_eq!(abilities.time_factor(), 1.0);

        // Cooldown counts from the trigger, not from expiry
        assert!(!abilities.focus.ready(11_000.0));
        assert!(abilities.focus.ready(11_000.5));
    }

    #[test]
    fn test_cannot_retrigger_while_active() {
        let mut shrink = TimedAbility::new(AbilityKind::Shrink, 0.0, Some(2000.0));
        assert!(shrink.try_activate(0.0, true));
        assert!(!shrink.try_activate(10.0, true));
        shrink.expire(2000.0);
        assert!(shrink.try_activate(2001.0, true));
    }

    #[test]
    fn test_pulse_requires_charge() {
        let mut abilities = Abilities::default();
        abilities.pulse_charges.charges = 0;
        assert!(!abilities.try_pulse(10_000.0));
        assert_eq!(abilities.pulse.cooldown.last_used(), None);
        assert_eq!(abilities.pulse_charges.charges, 0);
    }

    #[test]
    fn test_pulse_consumes_charge_and_restarts_cooldown() {
        let mut abilities = Abilities::default();
        assert!(abilities.try_pulse(100.0));
        assert_eq!(abilities.pulse_charges.charges, PULSE_MAX_CHARGES - 1);
        assert!(!abilities.try_pulse(3100.0));
        assert!(abilities.try_pulse(3100.5));
        assert_eq!(abilities.pulse_charges.charges, PULSE_MAX_CHARGES - 2);
    }

    #[test]
    fn test_charge_regen_follows_last_use() {
        let mut abilities = Abilities::default();
        abilities.try_pulse(0.0);
        abilities.try_pulse(3001.0);
        abilities.try_pulse(6002.0);
        assert_eq!(abilities.pulse_charges.charges, 2);

        // Nothing comes back until 6000 ms after the last use at 6002
        abilities.update(12_002.0);
        assert_eq!(abilities.pulse_charges.charges, 2);

        // Then one charge per tick until full
        for i in 0..5 {
            abilities.update(12_003.0 + i as f64 * 16.7);
        }
        assert_eq!(abilities.pulse_charges.charges, PULSE_MAX_CHARGES);
    }

    #[test]
    fn test_using_pulse_stalls_regen() {
        let mut abilities = Abilities::default();
        abilities.try_pulse(0.0);
        abilities.update(5000.0);
        assert!(abilities.try_pulse(5000.0));
        assert_eq!(abilities.pulse_charges.charges, 3);
        // 6000 ms after the first use, but only 4000 after the second
        abilities.update(9000.0);
        assert_eq!(abilities.pulse_charges.charges, 3);
        abilities.update(11_000.5);
        assert_eq!(abilities.pulse_charges.charges, 4);
    }

    #[test]
    fn test_drained_pool_without_use_regens() {
        let mut pool = ChargePool::new(5, 6000.0);
        pool.charges = 0;
        assert!(pool.regenerate(0.0, None));
        assert_eq!(pool.charges, 1);
    }

    #[test]
    fn test_readiness_and_reset() {
        let mut abilities = Abilities::default();
        let ready = abilities.readiness(0.0);
        assert!(ready.dash && ready.focus && ready.pulse && ready.shrink);
        assert_eq!(ready.pulse_charges, PULSE_MAX_CHARGES);

        abilities.dash.try_activate(0.0, true);
        abilities.shrink.try_activate(0.0, true);
        let ready = abilities.readiness(10.0);
        assert!(!ready.dash && !ready.shrink);

        abilities.reset();
        assert!(abilities.readiness(10.0).dash);
        assert!(!abilities.shrunk());
    }
}
