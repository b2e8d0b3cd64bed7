//! Settlement rebellions: towns with collapsing loyalty rise up, hand
//! themselves to a new rebel clan, and that clan later matures into an
//! independent kingdom.

pub mod consequences;
pub mod heroes;
pub mod icons;
pub mod legacy;
pub mod loyalty;
pub mod maturation;
pub mod trigger;
pub mod uprising;

use rand::Rng;
use tracing::{debug, warn};

use self::icons::IconFrequencyTable;
use self::legacy::{LoadInfo, VersionParseError, clear_stale_rebellious_flags};
use self::loyalty::{SettlementLoyaltyModel, post_rebellion_boost};
use self::maturation::MaturationTracker;
use self::uprising::{UprisingOutcome, UprisingState, execute_uprising};
use super::context::TickContext;
use super::names::{CultureNameGenerator, NameGenerator};
use super::signal::Signal;
use super::system::{SimSystem, SystemRegistry, TickFrequency};
use crate::config::RebellionConfig;
use crate::model::CampaignWorld;
use crate::persist::{PersistError, SaveStore};

/// Save key for the maturation counters.
pub const MATURATION_KEY: &str = "rebel_clans_days_since_creation";
/// Save key for the banner icon usage table.
pub const ICON_FREQUENCY_KEY: &str = "culture_icon_frequencies";

/// The daily rebellion loop: owns the maturation counters and icon usage
/// table, and is the only thing that mutates them.
pub struct RebellionSystem {
    config: RebellionConfig,
    loyalty: Box<dyn SettlementLoyaltyModel>,
    names: Box<dyn NameGenerator>,
    tracker: MaturationTracker,
    icons: IconFrequencyTable,
}

impl RebellionSystem {
    pub const NAME: &'static str = "rebellions";

    /// Loyalty thresholds come from `config.loyalty` until a host model is
    /// plugged in with [`with_loyalty_model`](Self::with_loyalty_model).
    pub fn new(config: RebellionConfig) -> Self {
        let loyalty: Box<dyn SettlementLoyaltyModel> = Box::new(config.loyalty);
        Self {
            config,
            loyalty,
            names: Box::new(CultureNameGenerator),
            tracker: MaturationTracker::new(),
            icons: IconFrequencyTable::new(),
        }
    }

    pub fn with_loyalty_model(mut self, model: impl SettlementLoyaltyModel + 'static) -> Self {
        self.loyalty = Box::new(model);
        self
    }

    pub fn with_name_generator(mut self, names: impl NameGenerator + 'static) -> Self {
        self.names = Box::new(names);
        self
    }

    pub fn config(&self) -> &RebellionConfig {
        &self.config
    }

    pub fn tracker(&self) -> &MaturationTracker {
        &self.tracker
    }

    pub fn icons(&self) -> &IconFrequencyTable {
        &self.icons
    }

    // -- Daily loop --

    /// One simulated day: every settlement in id order, then every rebel
    /// clan that existed when the day began.
    pub fn daily_tick(&mut self, ctx: &mut TickContext) {
        let clans = self.tracker.clans();
        let settlements: Vec<u64> = ctx.world.settlements.keys().copied().collect();
        for settlement_id in settlements {
            self.settlement_daily(ctx, settlement_id);
        }
        for clan_id in clans {
            self.clan_daily(ctx, clan_id);
        }
    }

    pub fn settlement_daily(&mut self, ctx: &mut TickContext, settlement_id: u64) {
        if self.config.rebellion_enabled && trigger::is_evaluable(ctx.world, settlement_id) {
            trigger::refresh_rebellious_state(
                ctx.world,
                settlement_id,
                self.loyalty.as_ref(),
                ctx.signals,
            );
            if ctx.rng.random_bool(self.config.trigger_chance)
                && trigger::should_rebel(
                    ctx.world,
                    settlement_id,
                    self.loyalty.as_ref(),
                    self.config.militia_advantage_ratio,
                )
            {
                self.start_rebellion(ctx, settlement_id);
            }
        }

        let settlement = ctx.world.settlement(settlement_id);
        let owner = settlement.owner_clan;
        if settlement.is_town() && ctx.world.clan(owner).is_rebel {
            match self.tracker.days(owner) {
                Some(days) => {
                    let boost = post_rebellion_boost(self.loyalty.as_ref(), days);
                    ctx.world.settlement_mut(settlement_id).add_loyalty(boost);
                }
                None => warn!(
                    settlement_id,
                    clan_id = owner,
                    "rebel-held town has no maturation entry"
                ),
            }
        }
    }

    /// Age a tracked rebel clan and mature it when ready.
    pub fn clan_daily(&mut self, ctx: &mut TickContext, clan_id: u64) -> Option<u64> {
        self.tracker.tick_clan(
            ctx.world,
            self.names.as_ref(),
            ctx.rng,
            ctx.signals,
            clan_id,
        )
    }

    /// Run an uprising at `settlement_id` unconditionally.
    pub fn start_rebellion(
        &mut self,
        ctx: &mut TickContext,
        settlement_id: u64,
    ) -> Option<UprisingOutcome> {
        execute_uprising(
            ctx.world,
            ctx.rng,
            ctx.signals,
            UprisingState {
                icons: &mut self.icons,
                tracker: &mut self.tracker,
                names: self.names.as_ref(),
            },
            settlement_id,
        )
    }

    // -- Host notifications --

    /// Besieged towns get their rebellious flag refreshed immediately.
    pub fn on_siege_started(&mut self, ctx: &mut TickContext, settlement_id: u64) {
        if ctx.world.settlement(settlement_id).is_town() {
            trigger::refresh_rebellious_state(
                ctx.world,
                settlement_id,
                self.loyalty.as_ref(),
                ctx.signals,
            );
        }
    }

    pub fn on_clan_destroyed(&mut self, clan_id: u64) {
        if self.tracker.remove(clan_id) {
            debug!(clan_id, "destroyed rebel clan dropped from maturation");
        }
    }

    pub fn on_new_game_created(&mut self, world: &CampaignWorld) {
        self.icons.reconcile(world);
    }

    /// Reconcile the icon table with the loaded catalog and, when an old save
    /// is upgraded, clear stale rebellious flags. Returns how many
    /// settlements were fixed.
    pub fn on_game_loaded(
        &mut self,
        world: &mut CampaignWorld,
        info: &LoadInfo,
        signals: &mut Vec<Signal>,
    ) -> Result<usize, VersionParseError> {
        self.icons.reconcile(world);
        let cutoff = self.config.migration_cutoff()?;
        if !info.needs_migration(cutoff) {
            return Ok(0);
        }
        Ok(clear_stale_rebellious_flags(world, signals))
    }

    // -- Persistence --

    pub fn save(&self, store: &mut SaveStore) -> Result<(), PersistError> {
        store.put(MATURATION_KEY, &self.tracker)?;
        store.put(ICON_FREQUENCY_KEY, &self.icons)
    }

    /// Replace engine state with what the store holds. Missing keys restore
    /// as empty (a save made before the engine was installed).
    pub fn restore(&mut self, store: &SaveStore) -> Result<(), PersistError> {
        self.tracker = store.get(MATURATION_KEY)?.unwrap_or_default();
        self.icons = store.get(ICON_FREQUENCY_KEY)?.unwrap_or_default();
        Ok(())
    }
}

impl SimSystem for RebellionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Daily
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        self.daily_tick(ctx);
    }

    fn handle_signals(&mut self, ctx: &mut TickContext) {
        for signal in ctx.inbox {
            match *signal {
                Signal::SiegeStarted { settlement_id } => self.on_siege_started(ctx, settlement_id),
                Signal::ClanDestroyed { clan_id } => self.on_clan_destroyed(clan_id),
                _ => {}
            }
        }
    }

    fn save(&self, store: &mut SaveStore) -> Result<(), PersistError> {
        RebellionSystem::save(self, store)
    }
}

/// Replace any installed rebellion behaviour with `system`.
/// Returns the system that was displaced, if any.
pub fn install(
    registry: &mut SystemRegistry,
    system: RebellionSystem,
) -> Option<Box<dyn SimSystem>> {
    let displaced = registry.remove_by_name(RebellionSystem::NAME);
    if displaced.is_some() {
        debug!("replaced existing rebellion system");
    }
    registry.add(Box::new(system));
    displaced
}
