/// External notification seams. Both sinks are optional and strictly
/// fire-and-forget: the simulation never waits on them and never reads
/// anything back, so a missing sink cannot affect gameplay.

/// Audio event cues. Default methods are no-ops so an implementation
/// overrides only the cues it plays.
pub trait AudioSink {
    fn on_shoot(&mut self) {}
    fn on_explosion(&mut self) {}
    fn on_hit(&mut self) {}
    fn on_powerup(&mut self) {}
    fn on_enemy_shoot(&mut self) {}
    fn on_transform(&mut self) {}
    fn on_smartbomb(&mut self) {}
}

/// Plain numeric HUD pushes, sent after each change.
pub trait HudSink {
    fn score(&mut self, value: u32);
    fn level(&mut self, value: u32);
    fn lives(&mut self, value: u32);
}
