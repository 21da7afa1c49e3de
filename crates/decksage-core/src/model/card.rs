use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coarse battlefield role, used only by the balance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Offense,
    Defense,
    Support,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Offense => "offense",
            Role::Defense => "defense",
            Role::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category label used for coverage and gap checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Building,
    Wincon,
    SmallSpell,
    MediumSpell,
    BigSpell,
    AntiAir,
    Splash,
    TankKiller,
    Swarm,
    Cycle,
}

impl Tag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Building => "building",
            Tag::Wincon => "wincon",
            Tag::SmallSpell => "small_spell",
            Tag::MediumSpell => "medium_spell",
            Tag::BigSpell => "big_spell",
            Tag::AntiAir => "anti_air",
            Tag::Splash => "splash",
            Tag::TankKiller => "tank_killer",
            Tag::Swarm => "swarm",
            Tag::Cycle => "cycle",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry: name, cost and its role/tag sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub elixir: f32,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl CardRecord {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

impl fmt::Display for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.elixir)
    }
}

#[cfg(test)]
mod tests {
    use super::{CardRecord, Role, Tag};
    use std::collections::BTreeSet;

    fn musketeer() -> CardRecord {
        CardRecord {
            name: "Musketeer".to_string(),
            elixir: 4.0,
            roles: BTreeSet::from([Role::Defense, Role::Support]),
            tags: BTreeSet::from([Tag::AntiAir, Tag::TankKiller]),
        }
    }

    #[test]
    fn role_and_tag_lookups() {
        let card = musketeer();
        assert!(card.has_role(Role::Support));
        assert!(!card.has_role(Role::Offense));
        assert!(card.has_tag(Tag::AntiAir));
        assert!(!card.has_tag(Tag::Building));
    }

    #[test]
    fn tags_serialize_as_snake_case() {
        let json = serde_json::to_string(&Tag::SmallSpell).unwrap();
        assert_eq!(json, "\"small_spell\"");
        let back: Tag = serde_json::from_str("\"tank_killer\"").unwrap();
        assert_eq!(back, Tag::TankKiller);
    }

    #[test]
    fn display_shows_name_and_cost() {
        assert_eq!(musketeer().to_string(), "Musketeer (4)");
    }
}
