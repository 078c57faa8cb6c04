//! Default rule set.
//!
//! These rules ship with every installation and are marked immutable.
//! Values are stored pre-packed, exactly as they sit in the rules table.

use sysreg_core::types::RuleLogic;

use crate::model::StoredRule;

struct Seed {
    value: u32,
    name: &'static str,
    description: &'static str,
    logic: RuleLogic,
}

const fn seed(value: u32, name: &'static str, description: &'static str) -> Seed {
    Seed {
        value,
        name,
        description,
        logic: RuleLogic::Primary,
    }
}

const fn alternative(value: u32, name: &'static str, description: &'static str) -> Seed {
    Seed {
        value,
        name,
        description,
        logic: RuleLogic::Alternative,
    }
}

const DEFAULTS: &[Seed] = &[
    // posts
    seed(1_048_579_360, "post_released_read_all", "Released posts readable by anyone"),
    seed(563_103_776, "post_creator_manage", "Record creator can fully manage their posts"),
    seed(276_826_912, "post_draft_read_member", "Members can read draft posts"),
    seed(142_609_440, "post_review_read_participant", "Participants can read posts in review"),
    seed(75_500_832, "post_released_read_partner", "Partners can read released posts"),
    seed(293_620_512, "post_draft_update_member", "Members can update draft posts"),
    // post transitions
    seed(539_361_568, "post_transition_new_draft_creator", "Creator can advance post from new to draft"),
    seed(539_493_152, "post_transition_draft_review_creator", "Creator can submit post for review"),
    seed(271_189_024, "post_transition_review_released_member", "Project members can approve a post"),
    alternative(270_926_880, "post_alt_transition_review_draft_member", "Project members can send a post back to draft"),
    alternative(810_418_208, "post_alt_transition_any_trash", "Creator or project members can trash posts"),
    seed(807_798_560, "post_transition_trash_draft", "Creator or project members can restore from trash"),
    // projects
    seed(1_048_579_336, "project_released_read_all", "Released projects readable by anyone"),
    seed(293_620_488, "project_draft_update_member", "Members can update draft projects"),
    seed(294_668_296, "project_all_manage_member", "Project members can fully manage the project"),
    // images
    seed(1_065_356_592, "image_released_read_all", "Released images readable and shareable"),
    seed(563_103_792, "image_creator_manage", "Image creator can fully manage their images"),
    seed(276_826_928, "image_draft_read_member", "Members can see draft images"),
    // events
    seed(1_048_579_368, "event_released_read_all", "Released events readable by anyone"),
    seed(563_103_784, "event_creator_manage", "Event creator can fully manage their events"),
    seed(276_843_304, "event_draft_update_member", "Members can update draft events"),
];

/// The immutable default rules, in insertion order.
pub fn default_rules() -> Vec<StoredRule> {
    DEFAULTS
        .iter()
        .map(|seed| {
            StoredRule::new(seed.value, seed.name)
                .with_description(seed.description)
                .with_logic(seed.logic)
                .immutable()
        })
        .collect()
}
