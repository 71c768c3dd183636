// Frog animation playback
//
// Nothing is drawn here: the player tracks which motion clip is showing,
// which frame it is on, and whether the sprite is mirrored.

use std::collections::HashMap;

/// The motion clips the player controller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionClip {
    Idle,
    Run,
    Jump,
    Fall,
}

impl MotionClip {
    pub const ALL: [MotionClip; 4] = [Self::Idle, Self::Run, Self::Jump, Self::Fall];

    /// Clip key in the frog sprite atlas
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "frog-idle",
            Self::Run => "frog-run",
            Self::Jump => "frog-jump",
            Self::Fall => "frog-fall",
        }
    }
}

/// Frame layout of one clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    pub frames: usize,
    /// Seconds each frame stays on screen
    pub frame_time: f32,
    pub looping: bool,
}

impl AnimationClip {
    /// A clip cycling through `frames` frames at `fps`
    pub fn looping(frames: usize, fps: f32) -> Self {
        Self {
            frames: frames.max(1),
            frame_time: 1.0 / fps,
            looping: true,
        }
    }

    /// A single held frame
    pub fn still() -> Self {
        Self {
            frames: 1,
            frame_time: 1.0,
            looping: false,
        }
    }

    /// Seconds for one pass through every frame
    pub fn cycle_time(&self) -> f32 {
        self.frames as f32 * self.frame_time
    }
}

#[derive(Debug, Default)]
pub struct AnimationPlayer {
    clips: HashMap<MotionClip, AnimationClip>,
    current: Option<MotionClip>,
    frame: usize,
    elapsed: f32,
    playing: bool,
    flipped: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frog's sheet: an 11 frame idle loop, a 12 frame run loop, and a
    /// single frame each for jumping and falling
    pub fn with_frog_animations() -> Self {
        let mut player = Self::new();
        player.insert(MotionClip::Idle, AnimationClip::looping(11, 10.0));
        player.insert(MotionClip::Run, AnimationClip::looping(12, 10.0));
        player.insert(MotionClip::Jump, AnimationClip::still());
        player.insert(MotionClip::Fall, AnimationClip::still());
        player
    }

    pub fn insert(&mut self, motion: MotionClip, clip: AnimationClip) {
        self.clips.insert(motion, clip);
    }

    /// Show `motion` from its first frame. Asking for the clip already
    /// showing only resumes it.
    pub fn play(&mut self, motion: MotionClip) {
        if self.current != Some(motion) {
            self.current = Some(motion);
            self.frame = 0;
            self.elapsed = 0.0;
        }
        self.playing = true;
    }

    /// Freeze on the first frame of the current clip
    pub fn stop(&mut self) {
        self.playing = false;
        self.frame = 0;
        self.elapsed = 0.0;
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    /// Whether the sprite is mirrored horizontally
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Advance by `dt` seconds. A non-looping clip holds its last frame and
    /// stops once it runs out.
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        let Some(clip) = self.current.and_then(|motion| self.clips.get(&motion)).copied() else {
            return;
        };

        self.elapsed += dt;
        let advanced = (self.elapsed / clip.frame_time) as usize;
        if advanced == 0 {
            return;
        }
        self.elapsed -= advanced as f32 * clip.frame_time;

        let next = self.frame + advanced;
        if clip.looping {
            self.frame = next % clip.frames;
        } else if next >= clip.frames {
            self.frame = clip.frames - 1;
            self.playing = false;
        } else {
            self.frame = next;
        }
    }

    pub fn current_clip(&self) -> Option<MotionClip> {
        self.current
    }

    /// Atlas key of the clip showing, or "" before the first `play`
    pub fn current_animation(&self) -> &'static str {
        self.current.map_or("", |motion| motion.name())
    }

    pub fn current_frame(&self) -> usize {
        self.frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}
