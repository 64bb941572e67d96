//! Shared fixtures for integration tests: a small card and item catalogue
//! plus helpers to build and drive lessons.

#![allow(dead_code)]

use lesson_engine::cards::{CardCategory, CardContent, CardDefinition, Registry};
use lesson_engine::core::{CardId, CardInstanceId, EngineContext, ItemId, LessonConfig, TurnTrack};
use lesson_engine::effects::{Condition, Cost, Effect, VitalityReduction};
use lesson_engine::items::{ItemContent, ItemDefinition};
use lesson_engine::lesson::{start_lesson, start_turn, Lesson, LessonSession};
use lesson_engine::modifiers::{Modifier, ModifierKind};
use lesson_engine::triggers::{IncreaseFilter, TriggerDeclaration};
use lesson_engine::LessonResult;

pub const APPEAL: CardId = CardId::new(1);
pub const POSE: CardId = CardId::new(2);
pub const FOCUS_UP: CardId = CardId::new(3);
pub const LEVERAGE: CardId = CardId::new(4);
pub const DRAW: CardId = CardId::new(5);
pub const INNATE: CardId = CardId::new(6);
pub const GOOD_CONDITION: CardId = CardId::new(7);
pub const DOUBLE: CardId = CardId::new(8);
pub const DELAYED: CardId = CardId::new(9);
pub const REACTIVE: CardId = CardId::new(10);
pub const EXTRA_USE: CardId = CardId::new(11);
pub const NEEDS_GOOD_CONDITION: CardId = CardId::new(12);
pub const EXPENSIVE: CardId = CardId::new(13);
pub const IMPRESSION: CardId = CardId::new(14);
pub const GENERATE: CardId = CardId::new(15);
pub const DRAIN: CardId = CardId::new(16);
pub const STRAIN: CardId = CardId::new(17);
pub const BRIGHTEN: CardId = CardId::new(18);
pub const GENERATED: CardId = CardId::new(100);

pub const ITEM_TURN_SCORE: ItemId = ItemId::new(1);
pub const ITEM_AFTER_VITALITY: ItemId = ItemId::new(2);
pub const ITEM_DANCE_TURN: ItemId = ItemId::new(3);
pub const ITEM_EVERY_OTHER_TURN: ItemId = ItemId::new(4);
pub const ITEM_SECOND_CARD: ItemId = ItemId::new(5);
pub const ITEM_LIFE_DECREASED: ItemId = ItemId::new(6);
pub const ITEM_LESSON_START: ItemId = ItemId::new(7);
pub const ITEM_COSTLY: ItemId = ItemId::new(8);
pub const ITEM_BEFORE_ACTIVE: ItemId = ItemId::new(9);
pub const ITEM_EVERY_CARD: ItemId = ItemId::new(10);
pub const ITEM_AFTER_FOCUS: ItemId = ItemId::new(11);
pub const ITEM_FOCUS_GAINED: ItemId = ItemId::new(12);

fn card(id: CardId, name: &str, category: CardCategory, content: CardContent) -> CardDefinition {
    CardDefinition::new(id, name, category, content)
}

fn free() -> CardContent {
    CardContent::new(Cost::free())
}

fn item(id: ItemId, name: &str, content: ItemContent) -> ItemDefinition {
    ItemDefinition::new(id, name, content)
}

/// The catalogue every integration test draws from.
pub fn registry() -> Registry {
    let mut registry = Registry::new();

    registry.register_card(
        card(
            APPEAL,
            "Appeal Basics",
            CardCategory::Active,
            CardContent::new(Cost::normal(4)).with_effect(Effect::score(9)),
        )
        .with_enhanced(CardContent::new(Cost::normal(4)).with_effect(Effect::score(14))),
    );
    registry.register_card(card(
        POSE,
        "Pose Basics",
        CardCategory::Mental,
        CardContent::new(Cost::normal(2)).with_effect(Effect::vitality(5)),
    ));
    registry.register_card(card(
        FOCUS_UP,
        "Concentration",
        CardCategory::Mental,
        CardContent::new(Cost::normal(3)).with_effect(Effect::get_modifier(Modifier::focus(2))),
    ));
    registry.register_card(card(
        LEVERAGE,
        "Full Power",
        CardCategory::Active,
        CardContent::new(Cost::normal(2))
            .with_effect(Effect::leverage_vitality(130, Some(VitalityReduction::Halve))),
    ));
    registry.register_card(card(
        DRAW,
        "Warm Up",
        CardCategory::Mental,
        CardContent::new(Cost::normal(1)).with_effect(Effect::draw(2)),
    ));
    registry.register_card(card(
        INNATE,
        "Opening Act",
        CardCategory::Active,
        free().with_effect(Effect::score(2)).innate(),
    ));
    registry.register_card(card(
        GOOD_CONDITION,
        "Good Mood",
        CardCategory::Mental,
        free()
            .with_effect(Effect::get_modifier(Modifier::good_condition(2)))
            .used_once(),
    ));
    registry.register_card(card(
        DOUBLE,
        "Encore",
        CardCategory::Mental,
        free().with_effect(Effect::get_modifier(Modifier::double_effect(1))),
    ));
    registry.register_card(card(
        DELAYED,
        "Slow Build",
        CardCategory::Mental,
        free().with_effect(Effect::get_modifier(Modifier::delayed(2, Effect::score(10)))),
    ));
    registry.register_card(card(
        REACTIVE,
        "Afterglow",
        CardCategory::Mental,
        free().with_effect(Effect::get_modifier(Modifier::reactive(
            2,
            TriggerDeclaration::turn_end(),
            Effect::score(3),
        ))),
    ));
    registry.register_card(card(
        EXTRA_USE,
        "Quick Step",
        CardCategory::Mental,
        free().with_effect(Effect::get_modifier(Modifier::AdditionalCardUsageCount { amount: 1 })),
    ));
    registry.register_card(card(
        NEEDS_GOOD_CONDITION,
        "Peak Form",
        CardCategory::Active,
        free()
            .with_condition(Condition::HasGoodCondition)
            .with_effect(Effect::score(20)),
    ));
    registry.register_card(card(
        EXPENSIVE,
        "All Out",
        CardCategory::Active,
        CardContent::new(Cost::life(40)).with_effect(Effect::score(50)),
    ));
    registry.register_card(card(
        IMPRESSION,
        "Charm",
        CardCategory::Mental,
        free().with_effect(Effect::get_modifier(Modifier::positive_impression(3))),
    ));
    registry.register_card(card(
        GENERATE,
        "Improvise",
        CardCategory::Mental,
        free().with_effect(Effect::GenerateCard),
    ));
    registry.register_card(card(
        DRAIN,
        "Overwork",
        CardCategory::Trouble,
        free().with_effect(Effect::drain_life(3)),
    ));
    registry.register_card(card(
        STRAIN,
        "Push Through",
        CardCategory::Active,
        free()
            .with_effect(Effect::get_modifier(Modifier::focus(2)))
            .with_effect(Effect::drain_life(2)),
    ));
    registry.register_card(card(
        BRIGHTEN,
        "Spotlight",
        CardCategory::Mental,
        free().with_effect(Effect::EnhanceHand),
    ));
    registry.register_generatable_card(
        card(GENERATED, "Spark", CardCategory::Active, free().with_effect(Effect::score(1)))
            .with_enhanced(free().with_effect(Effect::score(2))),
    );

    registry.register_item(item(
        ITEM_TURN_SCORE,
        "Stopwatch",
        ItemContent::new(TriggerDeclaration::turn_start())
            .with_effect(Effect::score(5))
            .with_times(2),
    ));
    registry.register_item(item(
        ITEM_AFTER_VITALITY,
        "Towel",
        ItemContent::new(TriggerDeclaration::after_card_increasing(IncreaseFilter::Vitality))
            .with_effect(Effect::score(4)),
    ));
    registry.register_item(item(
        ITEM_DANCE_TURN,
        "Dance Shoes",
        ItemContent::new(TriggerDeclaration::turn_start().on_track(TurnTrack::Dance)).with_effect(Effect::score(6)),
    ));
    registry.register_item(item(
        ITEM_EVERY_OTHER_TURN,
        "Metronome",
        ItemContent::new(TriggerDeclaration::every_n_turns(2)).with_effect(Effect::score(1)),
    ));
    registry.register_item(item(
        ITEM_SECOND_CARD,
        "Notebook",
        ItemContent::new(TriggerDeclaration::card_usage_count(2)).with_effect(Effect::score(2)),
    ));
    registry.register_item(item(
        ITEM_LIFE_DECREASED,
        "Bandage",
        ItemContent::new(TriggerDeclaration::life_decreased()).with_effect(Effect::score(3)),
    ));
    registry.register_item(item(
        ITEM_LESSON_START,
        "Lucky Charm",
        ItemContent::new(TriggerDeclaration::lesson_start())
            .with_effect(Effect::get_modifier(Modifier::good_condition(3))),
    ));
    registry.register_item(item(
        ITEM_COSTLY,
        "Energy Drink",
        ItemContent::new(TriggerDeclaration::turn_start())
            .with_cost(Cost::life(10))
            .with_effect(Effect::score(1)),
    ));
    registry.register_item(item(
        ITEM_BEFORE_ACTIVE,
        "Mirror",
        ItemContent::new(TriggerDeclaration::before_card(Some(CardCategory::Active))).with_effect(Effect::score(1)),
    ));
    registry.register_item(item(
        ITEM_EVERY_CARD,
        "Tally Counter",
        ItemContent::new(TriggerDeclaration::card_usage_count(1)).with_effect(Effect::score(1)),
    ));
    registry.register_item(item(
        ITEM_AFTER_FOCUS,
        "Headband",
        ItemContent::new(TriggerDeclaration::after_card_increasing(IncreaseFilter::Modifier(
            ModifierKind::Focus,
        )))
        .with_effect(Effect::score(1)),
    ));
    registry.register_item(item(
        ITEM_FOCUS_GAINED,
        "Earplugs",
        ItemContent::new(TriggerDeclaration::modifier_increased(ModifierKind::Focus)).with_effect(Effect::score(1)),
    ));

    registry
}

/// A lesson of `turns` vocal turns with the given deck.
pub fn config(turns: usize, deck: &[CardId]) -> LessonConfig {
    deck.iter()
        .fold(LessonConfig::new(vec![TurnTrack::Vocal; turns]), |config, id| {
            config.with_card(*id, false)
        })
}

/// Build a lesson, run the lesson-start phase and open the first turn.
pub fn begin(config: &LessonConfig, ctx: &mut EngineContext) -> Lesson {
    let lesson = Lesson::new(config, ctx).unwrap();
    let lesson = start_lesson(&lesson, ctx).unwrap().lesson;
    start_turn(&lesson, ctx).unwrap().lesson
}

/// First instance of `card` in hand.
pub fn hand_card(lesson: &Lesson, card: CardId) -> CardInstanceId {
    lesson
        .piles
        .hand
        .iter()
        .copied()
        .find(|id| lesson.card(*id).map(|c| c.card_id) == Some(card))
        .unwrap_or_else(|| panic!("{card} should be in hand"))
}

/// Play a session to its end: use the first usable card each turn, skip
/// when none is usable.
pub fn play_greedy(session: &mut LessonSession, ctx: &mut EngineContext) -> LessonResult<()> {
    session.start_lesson(ctx)?;
    while !session.is_ended() {
        session.start_turn(ctx)?;
        if session.is_ended() {
            break;
        }
        let playable = session
            .lesson()
            .piles
            .hand
            .iter()
            .copied()
            .find(|card| session.can_use_card(*card, ctx));
        match playable {
            Some(card) => {
                session.use_card(card, ctx)?;
            }
            None => {
                session.skip_turn(ctx)?;
            }
        }
        session.end_turn(ctx)?;
    }
    Ok(())
}
