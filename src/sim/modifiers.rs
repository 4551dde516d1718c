//! Power-up kinds and the timed modifiers they grant
//!
//! Each modifier has a fixed row in [`Modifier::profile`]: how long it lasts,
//! how many hits it absorbs (ghost only), and how it scales world speed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A timed gameplay effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    Shield,
    SlowMotion,
    Magnet,
    DoublePoints,
    Ghost,
    SpeedBoost,
}

/// Static table row for a modifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifierProfile {
    /// Lifetime in ticks
    pub duration: u32,
    /// Collisions absorbed before the modifier is spent
    pub uses: Option<u32>,
    /// Multiplier applied to pipe speed while active
    pub time_scale: Option<f32>,
}

impl Modifier {
    pub const ALL: [Modifier; 6] = [
        Modifier::Shield,
        Modifier::SlowMotion,
        Modifier::Magnet,
        Modifier::DoublePoints,
        Modifier::Ghost,
        Modifier::SpeedBoost,
    ];

    pub fn profile(self) -> ModifierProfile {
        match self {
            Modifier::Shield => ModifierProfile {
                duration: 300,
                uses: None,
                time_scale: None,
            },
            Modifier::SlowMotion => ModifierProfile {
                duration: 350,
                uses: None,
                time_scale: Some(0.5),
            },
            Modifier::Magnet => ModifierProfile {
                duration: 500,
                uses: None,
                time_scale: None,
            },
            Modifier::DoublePoints => ModifierProfile {
                duration: 750,
                uses: None,
                time_scale: None,
            },
            Modifier::Ghost => ModifierProfile {
                duration: 150,
                uses: Some(2),
                time_scale: None,
            },
            Modifier::SpeedBoost => ModifierProfile {
                duration: 400,
                uses: None,
                time_scale: Some(1.3),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Shield => "shield",
            Modifier::SlowMotion => "slowMotion",
            Modifier::Magnet => "magnet",
            Modifier::DoublePoints => "doublePoints",
            Modifier::Ghost => "ghost",
            Modifier::SpeedBoost => "speedBoost",
        }
    }

    /// HUD glyph
    pub fn icon(&self) -> &'static str {
        match self {
            Modifier::Shield => "🛡",
            Modifier::SlowMotion => "⏱",
            Modifier::Magnet => "🧲",
            Modifier::DoublePoints => "2x",
            Modifier::Ghost => "👻",
            Modifier::SpeedBoost => "⚡",
        }
    }
}

/// What a collectible grants on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Currency, never a modifier
    Coin,
    Boost(Modifier),
}

impl PowerUpKind {
    pub fn modifier(self) -> Option<Modifier> {
        match self {
            PowerUpKind::Coin => None,
            PowerUpKind::Boost(m) => Some(m),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Coin => "coin",
            PowerUpKind::Boost(m) => m.as_str(),
        }
    }

    /// Render color (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Coin => 0xFFD700,
            PowerUpKind::Boost(Modifier::Shield) => 0xFFD700,
            PowerUpKind::Boost(Modifier::SlowMotion) => 0x00BFFF,
            PowerUpKind::Boost(Modifier::Magnet) => 0xFF69B4,
            PowerUpKind::Boost(Modifier::DoublePoints) => 0xFFB700,
            PowerUpKind::Boost(Modifier::Ghost) => 0xE0E0E0,
            PowerUpKind::Boost(Modifier::SpeedBoost) => 0xFF4500,
        }
    }
}

/// A modifier currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveModifier {
    pub remaining: u32,
    /// Ghost hits left; `None` for modifiers without a use counter
    pub uses: Option<u32>,
}

/// Session-scoped map of active modifiers, at most one per kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveModifiers {
    entries: BTreeMap<Modifier, ActiveModifier>,
}

impl ActiveModifiers {
    /// Install a fresh entry. Re-activating overwrites the old one (duration resets).
    pub fn activate(&mut self, modifier: Modifier) {
        let profile = modifier.profile();
        self.entries.insert(
            modifier,
            ActiveModifier {
                remaining: profile.duration,
                uses: profile.uses,
            },
        );
    }

    pub fn is_active(&self, modifier: Modifier) -> bool {
        self.entries.contains_key(&modifier)
    }

    pub fn get(&self, modifier: Modifier) -> Option<&ActiveModifier> {
        self.entries.get(&modifier)
    }

    pub fn remove(&mut self, modifier: Modifier) -> Option<ActiveModifier> {
        self.entries.remove(&modifier)
    }

    /// Spend one ghost use. Returns the uses left; the entry is dropped at zero.
    pub fn spend_ghost(&mut self) -> u32 {
        let Some(ghost) = self.entries.get_mut(&Modifier::Ghost) else {
            return 0;
        };
        let left = ghost.uses.unwrap_or(0).saturating_sub(1);
        ghost.uses = Some(left);
        if left == 0 {
            self.entries.remove(&Modifier::Ghost);
        }
        left
    }

    /// Count every timer down by one tick and drop the expired ones
    pub fn tick_down(&mut self) {
        for active in self.entries.values_mut() {
            active.remaining = active.remaining.saturating_sub(1);
        }
        self.entries.retain(|_, active| active.remaining > 0);
    }

    /// Pipe speed scale for this tick. Slow-motion wins over speed-boost.
    pub fn time_scale(&self) -> f32 {
        [Modifier::SlowMotion, Modifier::SpeedBoost]
            .into_iter()
            .filter(|m| self.is_active(*m))
            .find_map(|m| m.profile().time_scale)
            .unwrap_or(1.0)
    }

    /// Pipe points per pass
    pub fn points_per_pass(&self) -> u32 {
        if self.is_active(Modifier::DoublePoints) { 2 } else { 1 }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Modifier, &ActiveModifier)> {
        self.entries.iter().map(|(m, a)| (*m, a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reactivation_resets_duration() {
        let mut mods = ActiveModifiers::default();
        mods.activate(Modifier::Shield);
        for _ in 0..100 {
            mods.tick_down();
        }
        assert_eq!(mods.get(Modifier::Shield).unwrap().remaining, 200);

        mods.activate(Modifier::Shield);
        assert_eq!(mods.get(Modifier::Shield).unwrap().remaining, 300);
        assert_eq!(mods.len(), 1);
    }

    #[test]
    fn test_expiry() {
        let mut mods = ActiveModifiers::default();
        mods.activate(Modifier::Ghost);
        for _ in 0..149 {
            mods.tick_down();
        }
        assert!(mods.is_active(Modifier::Ghost));
        mods.tick_down();
        assert!(!mods.is_active(Modifier::Ghost));
    }

    #[test]
    fn test_ghost_uses() {
        let mut mods = ActiveModifiers::default();
        mods.activate(Modifier::Ghost);
        assert_eq!(mods.get(Modifier::Ghost).unwrap().uses, Some(2));
        assert_eq!(mods.spend_ghost(), 1);
        assert!(mods.is_active(Modifier::Ghost));
        assert_eq!(mods.spend_ghost(), 0);
        assert!(!mods.is_active(Modifier::Ghost));
    }

    #[test]
    fn test_time_scale_precedence() {
        let mut mods = ActiveModifiers::default();
        assert_eq!(mods.time_scale(), 1.0);
        mods.activate(Modifier::SpeedBoost);
        assert_eq!(mods.time_scale(), 1.3);
        mods.activate(Modifier::SlowMotion);
        assert_eq!(mods.time_scale(), 0.5);
    }

    #[test]
    fn test_power_up_kinds() {
        assert_eq!(PowerUpKind::Coin.modifier(), None);
        assert_eq!(PowerUpKind::Coin.as_str(), "coin");
        let ghost = PowerUpKind::Boost(Modifier::Ghost);
        assert_eq!(ghost.modifier(), Some(Modifier::Ghost));
        assert_eq!(ghost.as_str(), "ghost");
        assert_eq!(ghost.color(), 0xE0E0E0);
        assert_eq!(
            serde_json::to_string(&PowerUpKind::Boost(Modifier::SlowMotion)).unwrap(),
            r#"{"boost":"slowMotion"}"#
        );
    }

    #[test]
    fn test_points_per_pass() {
        let mut mods = ActiveModifiers::default();
        assert_eq!(mods.points_per_pass(), 1);
        mods.activate(Modifier::DoublePoints);
        assert_eq!(mods.points_per_pass(), 2);
    }
}
