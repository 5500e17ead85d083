// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The master scroll surface: offset, panning, animations, and touch routing.

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;

use kurbo::Point;
use parallax_layout::ItemRef;
use smallvec::SmallVec;

use crate::{HitTarget, resolve_item};

/// Pointer identifier for tracking multiple concurrent touches.
pub type PointerId = NonZeroU64;

const DEFAULT_POINTER: PointerId = NonZeroU64::MIN;

/// Tuning for panning, overscroll, and animations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Distance in logical pixels a pointer must travel before it starts panning.
    pub drag_threshold: f64,
    /// Fraction of the pointer travel applied beyond either end of the content
    /// (`0.0` disables overscroll, `1.0` follows the pointer freely).
    pub overscroll_resistance: f64,
    /// Duration of the bounce back from overscroll, in milliseconds.
    pub bounce_duration: u64,
    /// Duration of animated programmatic scrolls, in milliseconds.
    pub scroll_duration: u64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 10.0,
            overscroll_resistance: 0.5,
            bounce_duration: 250,
            scroll_duration: 300,
        }
    }
}

/// What the host should do in response to a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEffect {
    /// Show the pressed state on an item.
    Highlight(ItemRef),
    /// Clear the pressed state of an item.
    Unhighlight(ItemRef),
    /// The item was tapped.
    Select(ItemRef),
}

/// Effects produced by a pointer event. A single pointer yields at most two.
pub type SurfaceEffects = SmallVec<[SurfaceEffect; 2]>;

/// Phase of an active touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// Pointer is down and has not moved.
    Pressed,
    /// Pointer moved within the drag threshold; the item is no longer highlighted.
    Moved,
    /// Pointer is panning the surface; the touch will not select.
    Panning,
}

#[derive(Clone, Debug)]
struct Touch {
    phase: TouchPhase,
    /// Item under the pointer at press time.
    pressed: Option<ItemRef>,
    highlighted: bool,
    down_position: Point,
}

#[derive(Clone, Copy, Debug)]
struct Pan {
    pointer: PointerId,
    anchor_x: f64,
    /// Unresisted offset at the moment the pan started.
    anchor_offset: f64,
}

#[derive(Clone, Copy, Debug)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    duration: u64,
    started_at: Option<u64>,
}

/// The single scroll-capturing surface laid over a stack of rows.
///
/// The surface owns the master content offset and turns raw pointer events
/// into scrolling plus [`SurfaceEffect`]s for the rows underneath. Offsets
/// outside `[0, max_offset]` are overscroll; they only arise from panning
/// past either end and are animated back on release.
#[derive(Clone, Debug)]
pub struct MasterScrollSurface {
    config: SurfaceConfig,
    content_offset: f64,
    content_extent: f64,
    viewport_extent: f64,
    touches: BTreeMap<PointerId, Touch>,
    pan: Option<Pan>,
    animation: Option<ScrollAnimation>,
}

impl MasterScrollSurface {
    /// Creates a surface with zero extents.
    #[must_use]
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            content_offset: 0.0,
            content_extent: 0.0,
            viewport_extent: 0.0,
            touches: BTreeMap::new(),
            pan: None,
            animation: None,
        }
    }

    /// Returns the surface configuration.
    #[must_use]
    pub const fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Current master content offset.
    #[must_use]
    pub const fn content_offset(&self) -> f64 {
        self.content_offset
    }

    /// Width of the scrollable content.
    #[must_use]
    pub const fn content_extent(&self) -> f64 {
        self.content_extent
    }

    /// Width of the surface viewport.
    #[must_use]
    pub const fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Furthest the surface can scroll without overscrolling.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Returns `true` if the content is wider than the viewport.
    #[must_use]
    pub fn can_scroll(&self) -> bool {
        self.content_extent > self.viewport_extent
    }

    /// Updates the content and viewport extents.
    ///
    /// A resting offset that now lies outside the scrollable range is clamped
    /// back into it. While a pan or an animation is in progress the offset is
    /// left alone; the pan's release or the animation's end settles it.
    pub fn set_extents(&mut self, content_extent: f64, viewport_extent: f64) {
        self.content_extent = content_extent.max(0.0);
        self.viewport_extent = viewport_extent.max(0.0);
        if self.pan.is_none() && self.animation.is_none() {
            self.content_offset = self.content_offset.clamp(0.0, self.max_offset());
        }
    }

    /// Moves the content offset, either immediately or with a linear animation.
    ///
    /// Any in-flight animation is superseded. An animation's clock starts at
    /// the first [`MasterScrollSurface::tick`] after this call.
    pub fn set_content_offset(&mut self, offset: f64, animated: bool) {
        self.animation = None;
        if animated && self.config.scroll_duration > 0 && offset != self.content_offset {
            self.animation = Some(ScrollAnimation {
                from: self.content_offset,
                to: offset,
                duration: self.config.scroll_duration,
                started_at: None,
            });
        } else {
            self.content_offset = offset;
        }
    }

    /// Returns `true` while an animation is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Returns `true` while a pointer is panning the surface.
    #[must_use]
    pub const fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Phase of the touch for `pointer_id`, or `None` if that pointer is idle.
    #[must_use]
    pub fn touch_phase(&self, pointer_id: Option<PointerId>) -> Option<TouchPhase> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        self.touches.get(&pointer_id).map(|touch| touch.phase)
    }

    /// Advances the in-flight animation to `now` (milliseconds).
    ///
    /// Returns `true` if the content offset changed.
    pub fn tick(&mut self, now: u64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let started_at = *animation.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        let before = self.content_offset;

        if animation.duration == 0 || elapsed >= animation.duration {
            self.content_offset = animation.to;
            self.animation = None;
        } else {
            let t = elapsed as f64 / animation.duration as f64;
            self.content_offset = animation.from + (animation.to - animation.from) * t;
        }
        self.content_offset != before
    }

    /// Records a pointer down event.
    ///
    /// A press stops any in-flight animation where it is, then highlights the
    /// item under the pointer, if there is one.
    pub fn on_down<H: HitTarget + ?Sized>(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        target: &H,
    ) -> SurfaceEffects {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let mut effects = SurfaceEffects::new();

        // A repeated down for the same pointer replaces the previous touch.
        if let Some(stale) = self.touches.remove(&pointer_id) {
            self.end_touch(pointer_id, &stale, &mut effects);
        }
        self.animation = None;

        let pressed = resolve_item(target, position);
        if let Some(item) = pressed {
            effects.push(SurfaceEffect::Highlight(item));
        }
        self.touches.insert(
            pointer_id,
            Touch {
                phase: TouchPhase::Pressed,
                pressed,
                highlighted: pressed.is_some(),
                down_position: position,
            },
        );
        effects
    }

    /// Records a pointer move event.
    ///
    /// Within the drag threshold, a move that still lands on an item clears
    /// the press highlight. Past the threshold the pointer starts panning
    /// (if the content can scroll and no other pointer is panning) and its
    /// item interaction is cancelled.
    pub fn on_move<H: HitTarget + ?Sized>(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        target: &H,
    ) -> SurfaceEffects {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let mut effects = SurfaceEffects::new();
        let can_pan = self.pan.is_none() && self.can_scroll();
        let threshold = self.config.drag_threshold;
        let content_offset = self.content_offset;

        let Some(touch) = self.touches.get_mut(&pointer_id) else {
            return effects;
        };

        if touch.phase != TouchPhase::Panning
            && can_pan
            && touch.down_position.distance(position) > threshold
        {
            touch.phase = TouchPhase::Panning;
            if let Some(item) = touch.pressed.filter(|_| touch.highlighted) {
                touch.highlighted = false;
                effects.push(SurfaceEffect::Unhighlight(item));
            }
            self.pan = Some(Pan {
                pointer: pointer_id,
                anchor_x: position.x,
                anchor_offset: self.unresisted(content_offset),
            });
            #[cfg(feature = "tracing")]
            tracing::trace!(pointer = pointer_id.get(), offset = content_offset, "pan began");
            return effects;
        }

        if touch.phase == TouchPhase::Panning {
            if let Some(pan) = self.pan.filter(|pan| pan.pointer == pointer_id) {
                let raw = pan.anchor_offset - (position.x - pan.anchor_x);
                self.content_offset = self.resisted(raw);
            }
            return effects;
        }

        if resolve_item(target, position).is_some() {
            touch.phase = TouchPhase::Moved;
            if let Some(item) = touch.pressed.filter(|_| touch.highlighted) {
                touch.highlighted = false;
                effects.push(SurfaceEffect::Unhighlight(item));
            }
        }
        effects
    }

    /// Records a pointer up event.
    ///
    /// A touch that never panned selects the item under the release point. A
    /// panning touch ends its pan instead and bounces back from overscroll.
    pub fn on_up<H: HitTarget + ?Sized>(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        target: &H,
    ) -> SurfaceEffects {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let mut effects = SurfaceEffects::new();
        let Some(touch) = self.touches.remove(&pointer_id) else {
            return effects;
        };

        self.end_touch(pointer_id, &touch, &mut effects);
        if touch.phase != TouchPhase::Panning {
            if let Some(item) = resolve_item(target, position) {
                #[cfg(feature = "tracing")]
                tracing::debug!(row = item.row, item = item.item, "item selected");
                effects.push(SurfaceEffect::Select(item));
            }
        }
        effects
    }

    /// Cancels the touch for a pointer: the highlight is cleared and nothing is selected.
    pub fn on_cancel(&mut self, pointer_id: Option<PointerId>) -> SurfaceEffects {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let mut effects = SurfaceEffects::new();
        if let Some(touch) = self.touches.remove(&pointer_id) {
            self.end_touch(pointer_id, &touch, &mut effects);
        }
        effects
    }

    /// Cancels every active touch, as when the rows underneath are rebuilt.
    pub fn cancel_all(&mut self) -> SurfaceEffects {
        let mut effects = SurfaceEffects::new();
        let touches = core::mem::take(&mut self.touches);
        for (pointer_id, touch) in &touches {
            self.end_touch(*pointer_id, touch, &mut effects);
        }
        effects
    }

    /// Clears a finished touch's highlight and ends its pan, if it owned one.
    ///
    /// Once no pointer is panning, an overscrolled offset that is not already
    /// animating bounces back. This also resumes a bounce that a press
    /// interrupted.
    fn end_touch(&mut self, pointer_id: PointerId, touch: &Touch, effects: &mut SurfaceEffects) {
        if let Some(item) = touch.pressed.filter(|_| touch.highlighted) {
            effects.push(SurfaceEffect::Unhighlight(item));
        }
        if self.pan.is_some_and(|pan| pan.pointer == pointer_id) {
            self.pan = None;
            #[cfg(feature = "tracing")]
            tracing::trace!(pointer = pointer_id.get(), offset = self.content_offset, "pan ended");
        }
        if self.pan.is_none() && self.animation.is_none() {
            self.bounce_back();
        }
    }

    /// Starts animating an overscrolled offset back to the nearest bound.
    fn bounce_back(&mut self) {
        let target = self.content_offset.clamp(0.0, self.max_offset());
        if target == self.content_offset {
            return;
        }
        if self.config.bounce_duration == 0 {
            self.content_offset = target;
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.content_offset,
            to: target,
            duration: self.config.bounce_duration,
            started_at: None,
        });
    }

    /// Applies the rubber band to an offset that followed the pointer 1:1.
    fn resisted(&self, raw: f64) -> f64 {
        let max = self.max_offset();
        let resistance = self.config.overscroll_resistance.clamp(0.0, 1.0);
        if raw < 0.0 {
            raw * resistance
        } else if raw > max {
            max + (raw - max) * resistance
        } else {
            raw
        }
    }

    /// Inverse of [`Self::resisted`], so a pan that starts while overscrolled
    /// continues from where the content is drawn.
    fn unresisted(&self, offset: f64) -> f64 {
        let max = self.max_offset();
        let resistance = self.config.overscroll_resistance.clamp(0.0, 1.0);
        if resistance == 0.0 {
            return offset.clamp(0.0, max);
        }
        if offset < 0.0 {
            offset / resistance
        } else if offset > max {
            max + (offset - max) / resistance
        } else {
            offset
        }
    }
}

impl Default for MasterScrollSurface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}
