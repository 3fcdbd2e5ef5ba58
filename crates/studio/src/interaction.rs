//! Pointer gesture state machine.
//!
//! Each tool owns only its own session data. Transitions consume the current
//! model and hand back the next one, so the caller decides where the value
//! lives.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use shared::units::to_meters;
use shared::{materials, Mass, MassId, MassingModel, MaterialId, Opening, Tree, WallKey};

use crate::geometry::wall_local_offset;
use crate::grid::snap_point;

/// Rects at or below this size on either axis are dropped on release
pub const MIN_DRAW_EXTENT: f64 = 0.01;

/// Footprint of a tool-placed opening, width by height in metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningSize {
    pub w: f64,
    pub h: f64,
}

impl OpeningSize {
    /// 4 ft square window
    pub fn window() -> Self {
        Self {
            w: to_meters(4.0, 0.0),
            h: to_meters(4.0, 0.0),
        }
    }

    /// 3 ft by 7 ft door
    pub fn door() -> Self {
        Self {
            w: to_meters(3.0, 0.0),
            h: to_meters(7.0, 0.0),
        }
    }
}

/// Tool selector as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Draw,
    SelectPushPull,
    Window,
    Door,
    Tree,
}

/// Axis-aligned draw rectangle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemporaryRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub d: f64,
}

impl TemporaryRect {
    fn is_degenerate(&self) -> bool {
        self.w <= MIN_DRAW_EXTENT || self.d <= MIN_DRAW_EXTENT
    }
}

/// Draw in progress. The anchor stays fixed while the rect follows the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSession {
    pub anchor: [f64; 2],
    pub rect: TemporaryRect,
}

/// Push/pull in progress on one mass
#[derive(Debug, Clone, PartialEq)]
pub struct PushSession {
    pub mass_id: MassId,
    pub start_y: f64,
    pub base_height: f64,
}

/// Active tool together with its session, if any
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    Draw { session: Option<DrawSession> },
    SelectPushPull { session: Option<PushSession> },
    Window,
    Door,
    Tree,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(Tool::default())
    }
}

/// What a pointer ray hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HitTarget {
    Ground,
    Roof { mass_id: MassId },
    Wall { mass_id: MassId, wall: WallKey },
    Miss,
}

/// Pointer event resolved against the scene. World Y is up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerHit {
    #[serde(default)]
    pub point: [f64; 3],
    pub target: HitTarget,
}

impl PointerHit {
    pub fn ground(x: f64, z: f64) -> Self {
        Self {
            point: [x, 0.0, z],
            target: HitTarget::Ground,
        }
    }

    pub fn roof(mass_id: impl Into<MassId>, point: [f64; 3]) -> Self {
        Self {
            point,
            target: HitTarget::Roof { mass_id: mass_id.into() },
        }
    }

    pub fn wall(mass_id: impl Into<MassId>, wall: WallKey, point: [f64; 3]) -> Self {
        Self {
            point,
            target: HitTarget::Wall {
                mass_id: mass_id.into(),
                wall,
            },
        }
    }

    pub fn miss() -> Self {
        Self {
            point: [0.0; 3],
            target: HitTarget::Miss,
        }
    }

    fn is_miss(&self) -> bool {
        matches!(self.target, HitTarget::Miss)
    }

    fn point_vec(&self) -> DVec3 {
        DVec3::from_array(self.point)
    }
}

/// Result of a single gesture event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GestureOutcome {
    /// The active tool does not react to this event
    Ignored,
    /// The event carried no usable target
    NoTarget,
    DrawStarted { rect: TemporaryRect },
    DrawUpdated { rect: TemporaryRect },
    MassCommitted { mass_id: MassId },
    /// Released with a zero-area rect
    DrawDiscarded,
    PushStarted { mass_id: MassId },
    HeightChanged { mass_id: MassId, h: f64 },
    PushEnded,
    OpeningPlaced {
        mass_id: MassId,
        opening: Opening,
        /// Position or size was adjusted to keep the opening inside its wall
        clamped: bool,
    },
}

impl GestureOutcome {
    /// Whether the accompanying model differs from the one passed in
    pub fn mutates_model(&self) -> bool {
        matches!(
            self,
            GestureOutcome::MassCommitted { .. }
                | GestureOutcome::HeightChanged { .. }
                | GestureOutcome::OpeningPlaced { .. }
        )
    }
}

/// Next model value plus what happened
#[derive(Debug, Clone)]
pub struct Transition {
    pub model: MassingModel,
    pub outcome: GestureOutcome,
}

impl Transition {
    fn new(model: MassingModel, outcome: GestureOutcome) -> Self {
        Self { model, outcome }
    }
}

/// Caller-provided defaults consulted by transitions
#[derive(Debug, Clone, PartialEq)]
pub struct ToolContext {
    /// Height of freshly drawn masses
    pub default_height: f64,
    /// Floor for push/pull
    pub min_height: f64,
    pub wall_material: MaterialId,
    pub roof_material: MaterialId,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self {
            default_height: to_meters(12.0, 0.0),
            min_height: to_meters(8.0, 0.0),
            wall_material: materials::WOOD_INSUL.to_string(),
            roof_material: materials::ROOF_INSUL.to_string(),
        }
    }
}

impl ToolState {
    /// Fresh state for a tool, with no session
    pub fn new(tool: Tool) -> Self {
        match tool {
            Tool::Draw => ToolState::Draw { session: None },
            Tool::SelectPushPull => ToolState::SelectPushPull { session: None },
            Tool::Window => ToolState::Window,
            Tool::Door => ToolState::Door,
            Tool::Tree => ToolState::Tree,
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            ToolState::Draw { .. } => Tool::Draw,
            ToolState::SelectPushPull { .. } => Tool::SelectPushPull,
            ToolState::Window => Tool::Window,
            ToolState::Door => Tool::Door,
            ToolState::Tree => Tool::Tree,
        }
    }

    /// Whether a drag is in flight
    pub fn has_session(&self) -> bool {
        matches!(
            self,
            ToolState::Draw { session: Some(_) } | ToolState::SelectPushPull { session: Some(_) }
        )
    }

    /// Rect of the draw in progress, for the preview overlay
    pub fn temporary_rect(&self) -> Option<TemporaryRect> {
        match self {
            ToolState::Draw { session: Some(s) } => Some(s.rect),
            _ => None,
        }
    }

    /// Switch tools. Any session in flight is discarded without touching the model.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.has_session() {
            tracing::debug!("Discarding {:?} session on tool change", self.tool());
        }
        *self = ToolState::new(tool);
    }

    // ── Gestures ──────────────────────────────────────────────

    pub fn gesture_start(&mut self, model: MassingModel, hit: &PointerHit, _ctx: &ToolContext) -> Transition {
        let outcome = match self {
            ToolState::Draw { session } => {
                if hit.is_miss() {
                    GestureOutcome::NoTarget
                } else {
                    let anchor = snap_point([hit.point[0], hit.point[2]], model.grid_module);
                    let rect = TemporaryRect {
                        x: anchor[0],
                        y: anchor[1],
                        w: 0.0,
                        d: 0.0,
                    };
                    *session = Some(DrawSession { anchor, rect });
                    GestureOutcome::DrawStarted { rect }
                }
            }
            ToolState::SelectPushPull { session } => match &hit.target {
                HitTarget::Roof { mass_id } => match model.get_mass(mass_id) {
                    Some(mass) => {
                        *session = Some(PushSession {
                            mass_id: mass_id.clone(),
                            start_y: hit.point[1],
                            base_height: mass.h,
                        });
                        GestureOutcome::PushStarted {
                            mass_id: mass_id.clone(),
                        }
                    }
                    None => {
                        *session = None;
                        GestureOutcome::NoTarget
                    }
                },
                _ => GestureOutcome::Ignored,
            },
            ToolState::Window => return place_opening_at(model, hit, OpeningSize::window(), false),
            ToolState::Door => return place_opening_at(model, hit, OpeningSize::door(), true),
            ToolState::Tree => GestureOutcome::Ignored,
        };
        tracing::debug!(tool = ?self.tool(), ?outcome, "gesture start");
        Transition::new(model, outcome)
    }

    pub fn gesture_move(&mut self, model: MassingModel, hit: &PointerHit, ctx: &ToolContext) -> Transition {
        if hit.is_miss() {
            return Transition::new(model, GestureOutcome::Ignored);
        }
        match self {
            ToolState::Draw { session: Some(session) } => {
                let [cx, cy] = snap_point([hit.point[0], hit.point[2]], model.grid_module);
                let [ax, ay] = session.anchor;
                session.rect = TemporaryRect {
                    x: ax.min(cx),
                    y: ay.min(cy),
                    w: (cx - ax).abs(),
                    d: (cy - ay).abs(),
                };
                Transition::new(model, GestureOutcome::DrawUpdated { rect: session.rect })
            }
            ToolState::SelectPushPull { session: Some(session) } => {
                let Some(mass) = model.get_mass(&session.mass_id) else {
                    return Transition::new(model, GestureOutcome::Ignored);
                };
                let delta = hit.point_vec().y - session.start_y;
                let floor = ctx.min_height.max(mass.openings_top());
                let h = floor.max(session.base_height + delta);
                let updated = mass.with_height(h);
                let mass_id = session.mass_id.clone();
                Transition::new(model.replace_mass(updated), GestureOutcome::HeightChanged { mass_id, h })
            }
            _ => Transition::new(model, GestureOutcome::Ignored),
        }
    }

    pub fn gesture_end(&mut self, model: MassingModel, ctx: &ToolContext) -> Transition {
        match self {
            ToolState::Draw { session } => {
                let Some(DrawSession { rect, .. }) = session.take() else {
                    return Transition::new(model, GestureOutcome::Ignored);
                };
                if rect.is_degenerate() {
                    tracing::debug!(w = rect.w, d = rect.d, "Discarding degenerate draw");
                    return Transition::new(model, GestureOutcome::DrawDiscarded);
                }
                let mass = Mass {
                    id: uuid::Uuid::new_v4().to_string(),
                    x: rect.x,
                    y: rect.y,
                    w: rect.w,
                    d: rect.d,
                    h: ctx.default_height,
                    wall_material: ctx.wall_material.clone(),
                    roof_material: ctx.roof_material.clone(),
                    openings: Vec::new(),
                };
                let mass_id = mass.id.clone();
                tracing::info!(id = %mass_id, w = mass.w, d = mass.d, h = mass.h, "Committed mass");
                Transition::new(model.with_mass(mass), GestureOutcome::MassCommitted { mass_id })
            }
            ToolState::SelectPushPull { session } => match session.take() {
                Some(_) => Transition::new(model, GestureOutcome::PushEnded),
                None => Transition::new(model, GestureOutcome::Ignored),
            },
            _ => Transition::new(model, GestureOutcome::Ignored),
        }
    }
}

/// Build an opening for `wall` of `mass` whose start edge sits at `local_x`.
///
/// The opening is shrunk to the wall if needed, `x` is clamped into
/// `[0, wall_width - w]`, and `z` is 0 for doors or mid-height for windows,
/// clamped into `[0, mass.h - h]`. Returns the opening and whether anything
/// was adjusted.
pub fn fit_opening(mass: &Mass, wall: WallKey, local_x: f64, size: OpeningSize, is_door: bool) -> (Opening, bool) {
    let wall_width = mass.wall_width(wall);
    let w = size.w.min(wall_width);
    let h = size.h.min(mass.h);
    let mut clamped = w < size.w || h < size.h;

    let x = local_x.clamp(0.0, wall_width - w);
    clamped |= x != local_x;

    let z = if is_door {
        0.0
    } else {
        (mass.h * 0.5 - h / 2.0).clamp(0.0, (mass.h - h).max(0.0))
    };

    let opening = Opening {
        wall,
        x,
        z,
        w,
        h,
        material: materials::GLASS_LOE.to_string(),
    };
    (opening, clamped)
}

fn place_opening_at(model: MassingModel, hit: &PointerHit, size: OpeningSize, is_door: bool) -> Transition {
    let HitTarget::Wall { mass_id, wall } = &hit.target else {
        return Transition::new(model, GestureOutcome::NoTarget);
    };
    let Some(mass) = model.get_mass(mass_id) else {
        return Transition::new(model, GestureOutcome::NoTarget);
    };

    let local_x = wall_local_offset(mass, *wall, hit.point_vec());
    let (opening, clamped) = fit_opening(mass, *wall, local_x, size, is_door);
    let updated = mass.with_opening(opening.clone());
    tracing::info!(
        mass = %mass_id,
        wall = wall.abbrev(),
        x = opening.x,
        z = opening.z,
        clamped,
        "Placed {}",
        if is_door { "door" } else { "window" }
    );
    let mass_id = mass_id.clone();
    Transition::new(
        model.replace_mass(updated),
        GestureOutcome::OpeningPlaced {
            mass_id,
            opening,
            clamped,
        },
    )
}

/// Tree at the given ground position, or at the default spot (0, 10 ft)
pub fn new_tree(x: Option<f64>, y: Option<f64>, h: Option<f64>) -> Tree {
    Tree {
        id: uuid::Uuid::new_v4().to_string(),
        x: x.unwrap_or(0.0),
        y: y.unwrap_or_else(|| to_meters(10.0, 0.0)),
        h: h.unwrap_or(2.4),
    }
}
