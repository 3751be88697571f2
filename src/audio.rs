//! Microphone capture for the whisper transcriber.

/// Whisper expects 16 kHz mono input.
pub const WHISPER_SAMPLE_RATE: usize = 16_000;

/// Clips quieter than this RMS level are treated as silence.
const SILENCE_RMS: f32 = 0.01;

/// Averages interleaved frames down to a single channel.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

pub fn is_silent(samples: &[f32]) -> bool {
    rms(samples) < SILENCE_RMS
}

#[cfg(feature = "whisper")]
pub use capture::{Recorder, resample};

#[cfg(feature = "whisper")]
mod capture {
    use super::{WHISPER_SAMPLE_RATE, downmix};
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use rubato::{FftFixedIn, Resampler};
    use std::error::Error;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const RESAMPLE_CHUNK: usize = 1024;

    pub struct Recorder {
        device: cpal::Device,
    }

    impl Recorder {
        pub fn default_input() -> Result<Self, Box<dyn Error>> {
            let host = cpal::default_host();
            let device = host
                .default_input_device()
                .ok_or("No input device found")?;
            log::info!("Using input device: {}", device.name()?);
            Ok(Self { device })
        }

        /// Records `duration` of audio as 16 kHz mono.
        pub fn record(&self, duration: Duration) -> Result<Vec<f32>, Box<dyn Error>> {
            let supported = self.device.default_input_config()?;
            if supported.sample_format() != cpal::SampleFormat::F32 {
                return Err("Unsupported sample format".into());
            }
            let channels = supported.channels() as usize;
            let sample_rate = supported.sample_rate().0 as usize;
            let config: cpal::StreamConfig = supported.into();

            let captured: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
            let sink = captured.clone();
            let stream = self.device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buffer) = sink.lock() {
                        buffer.extend_from_slice(data);
                    }
                },
                |err| log::warn!("Stream error: {}", err),
                None,
            )?;

            stream.play()?;
            std::thread::sleep(duration);
            drop(stream);

            let interleaved = {
                let mut buffer = captured.lock().map_err(|e| e.to_string())?;
                std::mem::take(&mut *buffer)
            };
            resample(&downmix(&interleaved, channels), sample_rate, WHISPER_SAMPLE_RATE)
        }
    }

    pub fn resample(mono: &[f32], from: usize, to: usize) -> Result<Vec<f32>, Box<dyn Error>> {
        if from == to || mono.is_empty() {
            return Ok(mono.to_vec());
        }
        let mut resampler = FftFixedIn::<f32>::new(from, to, RESAMPLE_CHUNK, 2, 1)?;
        let mut output = Vec::with_capacity(mono.len() * to / from + RESAMPLE_CHUNK);
        let mut position = 0;
        while position < mono.len() {
            let needed = resampler.input_frames_next();
            let end = (position + needed).min(mono.len());
            let mut chunk = mono[position..end].to_vec();
            chunk.resize(needed, 0.0);
            let frames = resampler.process(&[chunk], None)?;
            output.extend_from_slice(&frames[0]);
            position = end;
        }
        output.truncate(mono.len() * to / from);
        Ok(output)
    }
}
