// stage.rs
//
// The demos' resource layer: movable balls with a tag and a color. Tasks
// mutate balls through a shared handle, and their liveness predicates ask
// whether the ball still exists. Destroying a ball is how a running
// journey gets stopped from the outside.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

/// Handle to a ball on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BallId(pub u32);

/// Display color. The wander demo flips it to show journey state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallColor {
    #[default]
    White,
    /// Journey underway.
    Blue,
    /// Arrived at the target.
    Gray,
}

/// A movable ball.
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    /// String tag for finding and clearing balls as a group.
    pub tag: String,
    pub pos: Vec2,
    pub color: BallColor,
}

/// Simple ball storage using a flat Vec.
/// Designed for a handful of balls, not thousands.
#[derive(Default)]
pub struct Stage {
    balls: Vec<Ball>,
    next_id: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stage behind the shared handle task closures capture.
    pub fn shared() -> SharedStage {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Create a ball. Returns its id.
    pub fn spawn(&mut self, tag: impl Into<String>, pos: Vec2) -> BallId {
        let id = BallId(self.next_id);
        self.next_id += 1;
        self.balls.push(Ball {
            id,
            tag: tag.into(),
            pos,
            color: BallColor::default(),
        });
        id
    }

    /// Destroy every ball carrying `tag`, then create a fresh one at `pos`
    /// under the same tag. Returns the new ball's id.
    pub fn renew(&mut self, tag: &str, pos: Vec2) -> BallId {
        self.clear_tag(tag);
        self.spawn(tag, pos)
    }

    /// Destroy every ball carrying `tag`. Returns how many were removed.
    pub fn clear_tag(&mut self, tag: &str) -> usize {
        let before = self.balls.len();
        self.balls.retain(|b| b.tag != tag);
        before - self.balls.len()
    }

    pub fn contains(&self, id: BallId) -> bool {
        self.balls.iter().any(|b| b.id == id)
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    /// Position of a ball, if it still exists.
    pub fn position(&self, id: BallId) -> Option<Vec2> {
        self.get(id).map(|b| b.pos)
    }

    /// Move a ball. Returns false if it no longer exists.
    pub fn set_position(&mut self, id: BallId, pos: Vec2) -> bool {
        match self.get_mut(id) {
            Some(ball) => {
                ball.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Recolor a ball. Returns false if it no longer exists.
    pub fn set_color(&mut self, id: BallId, color: BallColor) -> bool {
        match self.get_mut(id) {
            Some(ball) => {
                ball.color = color;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

/// Shared stage handle for task closures.
pub type SharedStage = Rc<RefCell<Stage>>;

/// Liveness predicate tied to one ball: true while it is on the stage.
pub fn ball_alive(stage: &SharedStage, id: BallId) -> impl Fn() -> bool + 'static {
    let stage = Rc::clone(stage);
    move || stage.borrow().contains(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_get() {
        let mut stage = Stage::new();
        let id = stage.spawn("ball", Vec2::new(10.0, 20.0));
        let ball = stage.get(id).unwrap();
        assert_eq!(ball.pos, Vec2::new(10.0, 20.0));
        assert_eq!(ball.color, BallColor::White);
    }

    #[test]
    fn renew_replaces_every_tagged_ball() {
        let mut stage = Stage::new();
        let a = stage.spawn("ball", Vec2::ZERO);
        let b = stage.spawn("ball", Vec2::ONE);
        let other = stage.spawn("wander", Vec2::ZERO);

        let fresh = stage.renew("ball", Vec2::new(-5.0, 0.0));

        assert!(!stage.contains(a));
        assert!(!stage.contains(b));
        assert!(stage.contains(other), "untagged balls survive a renew");
        assert_eq!(stage.position(fresh), Some(Vec2::new(-5.0, 0.0)));
        assert_eq!(stage.len(), 2);
    }

    #[test]
    fn clear_tag_reports_how_many_fell() {
        let mut stage = Stage::new();
        stage.spawn("ball", Vec2::ZERO);
        stage.spawn("ball", Vec2::ONE);
        stage.spawn("wander", Vec2::ZERO);

        assert_eq!(stage.clear_tag("ball"), 2);
        assert_eq!(stage.clear_tag("ball"), 0);
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn ball_alive_follows_the_ball() {
        let stage = Stage::shared();
        let id = stage.borrow_mut().spawn("ball", Vec2::ZERO);
        let alive = ball_alive(&stage, id);

        assert!(alive());
        stage.borrow_mut().clear_tag("ball");
        assert!(!alive());
    }
}
