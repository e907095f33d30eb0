//! Flag kind catalog.
//!
//! The set of kinds is closed and fixed at compile time. Each kind carries its
//! aliases, its restriction bits and the reference text rendered by
//! [`crate::docs::render_flag_reference`].

use bitflags::bitflags;
use strum::IntoEnumIterator;

bitflags! {
    /// Restriction bits attached to a [`FlagKind`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FlagBits: u8 {
        /// Only valid on recipe containers.
        const RECIPE_ONLY      = 1 << 0;
        /// Only valid on result containers.
        const RESULT_ONLY      = 1 << 1;
        /// The declaration must not carry argument text.
        const NO_VALUE         = 1 << 2;
        /// Excluded from persisted containers.
        const NO_STORE         = 1 << 3;
        /// A removal keyword is parsed as a literal argument.
        const NO_FALSE_REMOVAL = 1 << 4;
    }
}

/// Identifies a flag's type.
///
/// Declaration order is the order used in generated documentation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum FlagKind {
    // ========================================================================
    // Shared
    // ========================================================================
    Message,
    Commands,
    Permission,
    ReqExp,
    ModExp,
    Explode,
    Inventory,
    Secret,
    Debug,

    // ========================================================================
    // Recipe only
    // ========================================================================
    Description,
    FailMessage,
    HideResults,
    Remove,
    Restrict,
    Override,

    // ========================================================================
    // Result only
    // ========================================================================
    Name,
    Lore,
}

/// Reference text for one kind.
#[derive(Clone, Copy, Debug)]
pub struct FlagDocs {
    pub usage: &'static [&'static str],
    pub description: &'static [&'static str],
    pub examples: &'static [&'static str],
}

impl FlagKind {
    /// Canonical lowercase name, without the `@` prefix.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Alternative names accepted in recipe files.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Message => &["craftmsg"],
            Self::Commands => &["command", "cmd"],
            Self::Permission => &["perm"],
            Self::ReqExp => &["expreq", "reqxp", "xpreq", "needexp", "needxp"],
            Self::ModExp => &["expmod", "modxp", "xpmod", "exp", "xp"],
            Self::Explode => &[],
            Self::Inventory => &[],
            Self::Secret => &["hide"],
            Self::Debug => &["monitor", "log"],
            Self::Description => &["recipeinfo", "info"],
            Self::FailMessage => &["failmsg"],
            Self::HideResults => &[],
            Self::Remove => &["delete"],
            Self::Restrict => &["denied", "deny"],
            Self::Override => &["overwrite", "supercede", "replace"],
            Self::Name => &["itemname", "displayname"],
            Self::Lore => &["itemlore", "itemdescription"],
        }
    }

    pub const fn bits(self) -> FlagBits {
        match self {
            Self::Message
            | Self::Permission
            | Self::ReqExp
            | Self::ModExp
            | Self::Explode
            | Self::Inventory => FlagBits::empty(),
            Self::Commands => FlagBits::NO_FALSE_REMOVAL,
            Self::Secret | Self::Debug => FlagBits::NO_VALUE,
            Self::Description | Self::FailMessage => FlagBits::RECIPE_ONLY,
            Self::HideResults | Self::Remove | Self::Restrict | Self::Override => {
                FlagBits::RECIPE_ONLY.union(FlagBits::NO_VALUE)
            }
            Self::Name => FlagBits::RESULT_ONLY.union(FlagBits::NO_STORE),
            Self::Lore => FlagBits::RESULT_ONLY
                .union(FlagBits::NO_STORE)
                .union(FlagBits::NO_FALSE_REMOVAL),
        }
    }

    pub const fn has_bit(self, bit: FlagBits) -> bool {
        self.bits().contains(bit)
    }

    /// Whether apply is executed one scheduling quantum after the craft.
    pub const fn is_deferred(self) -> bool {
        matches!(self, Self::Explode)
    }

    /// All kinds in declaration order.
    pub fn all() -> impl Iterator<Item = FlagKind> {
        Self::iter()
    }

    pub const fn docs(self) -> FlagDocs {
        match self {
            Self::Message => FlagDocs {
                usage: &["{flag} <text>"],
                description: &[
                    "Prints a message to the crafter when the recipe succeeds.",
                    "The text may use {player}, {playerdisplay}, {result}, {recipetype}, {world}, {x}, {y} and {z}.",
                ],
                examples: &["{flag} <green>You crafted {result}!"],
            },
            Self::Commands => FlagDocs {
                usage: &["{flag} <command> | [command] | ..."],
                description: &[
                    "Runs commands when the recipe succeeds.",
                    "Commands starting with / run as the crafter, all others run from the console.",
                    "The value 'false' is a literal command argument, this flag can not be removed by it.",
                ],
                examples: &["{flag} say {player} crafted {result} | /spawn"],
            },
            Self::Permission => FlagDocs {
                usage: &["{flag} <[!]node>, [[!]node], ... | [failmsg <text>]"],
                description: &[
                    "Requires the crafter to hold at least one of the listed permission nodes.",
                    "Nodes prefixed with ! must not be held.",
                    "failmsg overrides the failure message, 'false' hides it; {permission} lists the nodes.",
                ],
                examples: &["{flag} diamond.craft", "{flag} !guest | failmsg Guests can not craft this."],
            },
            Self::ReqExp => FlagDocs {
                usage: &["{flag} <min>[-max] | [failmsg <text>]"],
                description: &[
                    "Requires the crafter's experience to be within the range.",
                    "failmsg overrides the failure message; {exp} is the required range.",
                ],
                examples: &["{flag} 100", "{flag} 50-200 | failmsg Need between {exp} experience."],
            },
            Self::ModExp => FlagDocs {
                usage: &["{flag} <[+-]amount> | [msg <text>]"],
                description: &[
                    "Changes the crafter's experience when the recipe succeeds.",
                    "msg overrides the effect message, 'false' hides it; {amount} is the signed change.",
                ],
                examples: &["{flag} 25", "{flag} -10 | msg Lost {amount} experience."],
            },
            Self::Explode => FlagDocs {
                usage: &["{flag} [arguments]"],
                description: &[
                    "Makes the crafting location explode one tick after the craft.",
                    "Arguments separated by | in any order:",
                    "  power <number>  = explosion power, default 2.0",
                    "  fire            = explosion sets fires",
                    "  nobreak         = explosion does not break blocks",
                    "  nodamage [self] = no entity damage, or only the crafter is protected with 'self'",
                    "  fail            = explode when the recipe fails instead of when it succeeds",
                ],
                examples: &[
                    "{flag} // power 2 on success, breaks blocks",
                    "{flag} nobreak | fire | power 6",
                    "{flag} fail | nodamage self",
                ],
            },
            Self::Inventory => FlagDocs {
                usage: &["{flag} <inventory kind>, ... | [title <text>] | [failmsg <text>]"],
                description: &[
                    "Requires crafting in one of the listed inventory kinds.",
                    "title additionally requires the inventory title to match exactly.",
                    "failmsg overrides the failure message; {inventory} and {title} are available.",
                ],
                examples: &["{flag} workbench", "{flag} workbench | title Custom"],
            },
            Self::Secret => FlagDocs {
                usage: &["{flag}"],
                description: &["Hides the recipe from recipe listings."],
                examples: &["{flag}"],
            },
            Self::Debug => FlagDocs {
                usage: &["{flag}"],
                description: &["Logs every successful craft of the recipe."],
                examples: &["{flag}"],
            },
            Self::Description => FlagDocs {
                usage: &["{flag} <text>"],
                description: &["Sets a description shown in recipe listings."],
                examples: &["{flag} A sturdy blade for beginners."],
            },
            Self::FailMessage => FlagDocs {
                usage: &["{flag} <text>"],
                description: &["Message shown to the crafter when the recipe fails."],
                examples: &["{flag} <red>The anvil rejects your materials, {player}."],
            },
            Self::HideResults => FlagDocs {
                usage: &["{flag}"],
                description: &["Hides the result list from recipe listings."],
                examples: &["{flag}"],
            },
            Self::Remove => FlagDocs {
                usage: &["{flag}"],
                description: &["Removes a matching existing recipe instead of adding one."],
                examples: &["{flag}"],
            },
            Self::Restrict => FlagDocs {
                usage: &["{flag}"],
                description: &["Disables the recipe; every craft attempt fails."],
                examples: &["{flag}"],
            },
            Self::Override => FlagDocs {
                usage: &["{flag}"],
                description: &["Replaces a matching existing recipe."],
                examples: &["{flag}"],
            },
            Self::Name => FlagDocs {
                usage: &["{flag} <text>"],
                description: &["Sets the display name of the result item."],
                examples: &["{flag} <gold>Excalibur"],
            },
            Self::Lore => FlagDocs {
                usage: &["{flag} <line> | [line] | ..."],
                description: &[
                    "Adds lore lines to the result item.",
                    "The value 'false' is a literal line, this flag can not be removed by it.",
                ],
                examples: &["{flag} Forged in dragon fire | Handle with care"],
            },
        }
    }
}

impl core::fmt::Display for FlagKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "@{}", self.name())
    }
}
