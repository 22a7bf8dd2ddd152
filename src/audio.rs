//! Tone cues
//!
//! A single square-wave voice: every effect is one frequency held for a fixed
//! clip length, stopped by polling `Buzzer::update` once per frame.

use crate::config::GameConfig;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a wall or paddle
    Bounce,
    /// A point was scored and the round restarts
    RoundReset,
}

impl SoundEffect {
    /// Frequency for a base tone: bounces play an octave up
    pub fn frequency(self, tone: f32) -> f32 {
        match self {
            SoundEffect::Bounce => tone * 2.0,
            SoundEffect::RoundReset => tone,
        }
    }

    /// Clip length in seconds
    pub fn duration(self) -> f32 {
        match self {
            SoundEffect::Bounce => 0.1,
            SoundEffect::RoundReset => 1.0,
        }
    }
}

/// Something that can hold a single tone
pub trait ToneDevice {
    fn play(&mut self, frequency_hz: f32);
    fn stop(&mut self);
}

impl<T: ToneDevice + ?Sized> ToneDevice for Box<T> {
    fn play(&mut self, frequency_hz: f32) {
        (**self).play(frequency_hz);
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

/// Device that discards every tone
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDevice;

impl ToneDevice for SilentDevice {
    fn play(&mut self, frequency_hz: f32) {
        log::trace!("silent tone {frequency_hz:.2} Hz");
    }

    fn stop(&mut self) {}
}

#[derive(Debug, Clone, Copy)]
struct Clip {
    length: f32,
    elapsed: f32,
    /// Set by the first update after `play`; that frame's dt is not counted
    started: bool,
}

/// Plays effects on a tone device and stops them when their clip runs out
pub struct Buzzer<D: ToneDevice> {
    device: D,
    tone: f32,
    muted: bool,
    clip: Option<Clip>,
}

impl<D: ToneDevice> Buzzer<D> {
    pub fn new(device: D, tone: f32) -> Self {
        Self {
            device,
            tone,
            muted: false,
            clip: None,
        }
    }

    pub fn from_config(device: D, config: &GameConfig) -> Self {
        let mut buzzer = Self::new(device, config.tone_frequency);
        buzzer.set_muted(config.muted);
        buzzer
    }

    /// Mute/unmute; muting cuts the current clip
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted && self.clip.take().is_some() {
            self.device.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.clip.is_some()
    }

    /// Start an effect, replacing whatever is playing
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.device.play(effect.frequency(self.tone));
        self.clip = Some(Clip {
            length: effect.duration(),
            elapsed: 0.0,
            started: false,
        });
    }

    /// Advance the clip clock and stop the device once the clip is over.
    ///
    /// The clock starts at the first update after `play`, so the frame that
    /// starts a clip does not shorten it.
    pub fn update(&mut self, dt: f32) {
        let Some(clip) = &mut self.clip else { return };
        if !clip.started {
            clip.started = true;
            return;
        }
        clip.elapsed += dt;
        if clip.elapsed >= clip.length {
            self.clip = None;
            self.device.stop();
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: ToneDevice> Drop for Buzzer<D> {
    fn drop(&mut self) {
        if self.clip.take().is_some() {
            self.device.stop();
        }
    }
}

/// Best available output: the system device when built with `audio`,
/// otherwise (or when it fails to open) silence
pub fn default_device() -> Box<dyn ToneDevice> {
    #[cfg(feature = "audio")]
    {
        match rodio_device::RodioDevice::open() {
            Ok(device) => {
                log::info!("audio output opened");
                return Box::new(device);
            }
            Err(err) => log::warn!("{err}; continuing without sound"),
        }
    }
    #[cfg(not(feature = "audio"))]
    log::info!("built without the audio feature; sound disabled");

    Box::new(SilentDevice)
}

#[cfg(feature = "audio")]
pub use rodio_device::RodioDevice;

#[cfg(feature = "audio")]
mod rodio_device {
    use std::time::Duration;

    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    use super::ToneDevice;
    use crate::error::{Error, Result};

    const SAMPLE_RATE: u32 = 44_100;
    const AMPLITUDE: f32 = 0.15;

    /// Endless square wave at a fixed frequency
    struct SquareWave {
        period: f32,
        position: f32,
    }

    impl SquareWave {
        fn new(frequency_hz: f32) -> Self {
            Self {
                period: SAMPLE_RATE as f32 / frequency_hz.max(1.0),
                position: 0.0,
            }
        }
    }

    impl Iterator for SquareWave {
        type Item = f32;

        fn next(&mut self) -> Option<f32> {
            let sample = if self.position < self.period / 2.0 {
                AMPLITUDE
            } else {
                -AMPLITUDE
            };
            self.position = (self.position + 1.0) % self.period;
            Some(sample)
        }
    }

    impl Source for SquareWave {
        fn current_frame_len(&self) -> Option<usize> {
            None
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            SAMPLE_RATE
        }

        fn total_duration(&self) -> Option<Duration> {
            None
        }
    }

    /// System audio output through rodio
    pub struct RodioDevice {
        sink: Sink,
        // Dropping the stream closes the device
        _stream: OutputStream,
        _handle: OutputStreamHandle,
    }

    impl RodioDevice {
        pub fn open() -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|err| Error::Audio(err.to_string()))?;
            let sink = Sink::try_new(&handle).map_err(|err| Error::Audio(err.to_string()))?;
            Ok(Self {
                sink,
                _stream: stream,
                _handle: handle,
            })
        }
    }

    impl ToneDevice for RodioDevice {
        fn play(&mut self, frequency_hz: f32) {
            self.sink.clear();
            self.sink.append(SquareWave::new(frequency_hz));
            self.sink.play();
        }

        fn stop(&mut self) {
            self.sink.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingDevice {
        played: Vec<f32>,
        stops: usize,
    }

    impl ToneDevice for RecordingDevice {
        fn play(&mut self, frequency_hz: f32) {
            self.played.push(frequency_hz);
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[test]
    fn test_effect_tones() {
        assert_eq!(SoundEffect::Bounce.frequency(286.94), 573.88);
        assert_eq!(SoundEffect::RoundReset.frequency(286.94), 286.94);
        assert_eq!(SoundEffect::Bounce.duration(), 0.1);
        assert_eq!(SoundEffect::RoundReset.duration(), 1.0);
    }

    #[test]
    fn test_clip_stops_after_duration() {
        let mut buzzer = Buzzer::new(RecordingDevice::default(), 100.0);
        buzzer.play(SoundEffect::Bounce);
        assert_eq!(buzzer.device().played, vec![200.0]);
        assert!(buzzer.is_playing());

        // Start frame
        buzzer.update(0.05);
        assert!(buzzer.is_playing());

        buzzer.update(0.05);
        assert!(buzzer.is_playing());
        assert_eq!(buzzer.device().stops, 0);

        buzzer.update(0.05);
        assert!(!buzzer.is_playing());
        assert_eq!(buzzer.device().stops, 1);

        // Nothing left to stop
        buzzer.update(1.0);
        assert_eq!(buzzer.device().stops, 1);
    }

    #[test]
    fn test_new_effect_replaces_clip() {
        let mut buzzer = Buzzer::new(RecordingDevice::default(), 100.0);
        buzzer.play(SoundEffect::Bounce);
        buzzer.update(0.016);
        buzzer.update(0.08);
        buzzer.play(SoundEffect::RoundReset);
        buzzer.update(0.016);
        buzzer.update(0.5);
        assert!(buzzer.is_playing());
        buzzer.update(0.5);
        assert!(!buzzer.is_playing());
        assert_eq!(buzzer.device().played, vec![200.0, 100.0]);
        assert_eq!(buzzer.device().stops, 1);
    }

    #[test]
    fn test_muted_never_plays() {
        let config = GameConfig {
            muted: true,
            ..GameConfig::default()
        };
        let mut buzzer = Buzzer::from_config(RecordingDevice::default(), &config);
        buzzer.play(SoundEffect::RoundReset);
        assert!(!buzzer.is_playing());
        assert!(buzzer.device().played.is_empty());
    }

    #[test]
    fn test_mute_cuts_current_clip() {
        let mut buzzer = Buzzer::new(RecordingDevice::default(), 100.0);
        buzzer.play(SoundEffect::RoundReset);
        buzzer.set_muted(true);
        assert!(!buzzer.is_playing());
        assert_eq!(buzzer.device().stops, 1);
    }

    #[test]
    fn test_boxed_silent_device() {
        let mut buzzer: Buzzer<Box<dyn ToneDevice>> = Buzzer::new(Box::new(SilentDevice), 286.94);
        buzzer.play(SoundEffect::Bounce);
        buzzer.update(0.016);
        buzzer.update(0.2);
        assert!(!buzzer.is_playing());
    }

    #[test]
    fn test_start_frame_does_not_shorten_clip() {
        let mut buzzer = Buzzer::new(RecordingDevice::default(), 100.0);
        buzzer.play(SoundEffect::Bounce);
        // A long start frame still leaves the whole clip to play
        buzzer.update(0.09);
        buzzer.update(0.05);
        assert!(buzzer.is_playing());
        buzzer.update(0.05);
        assert!(!buzzer.is_playing());
        assert_eq!(buzzer.device().stops, 1);
    }
}
