use std::fmt::Formatter;
use std::time::Duration;
use std::{fmt, io};

use anyhow::Context;
use rodio::Source;
use symphonia::core::audio::{SampleBuffer, SignalSpec};
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions, ReadOnlySource};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Endless decoded radio stream.
pub struct StreamDecoder {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,

    offset: usize,
    buffer: SampleBuffer<i16>,
    spec: SignalSpec,
}

impl StreamDecoder {
    /// Opens `url` and decodes the first packet. Blocks on network I/O.
    pub fn from_http(url: &str) -> anyhow::Result<Self> {
        let resp = reqwest::blocking::Client::builder()
            .user_agent(APP_USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            // Streams are endless, only connecting is bounded.
            .timeout(None::<Duration>)
            .build()?
            .get(url)
            .send()
            .context("get http response")?
            .error_for_status()
            .context("stream status")?;

        Self::from_reader(resp)
    }

    pub fn from_reader<R>(reader: R) -> anyhow::Result<Self>
    where
        R: io::Read + Send + Sync + 'static,
    {
        let rs = ReadOnlySource::new(reader);
        let mss = MediaSourceStream::new(Box::new(rs), MediaSourceStreamOptions::default());

        let probe = get_probe()
            .format(
                &Hint::new(),
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .context("probe stream format")?;

        let mut reader = probe.format;
        let track = reader.default_track().context("track must be found")?;
        let mut decoder = get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .context("make decoder")?;

        let packet = reader.next_packet().context("packet must be found")?;
        let decoded_buf = decoder.decode(&packet).context("decode packet")?;
        let spec = *decoded_buf.spec();

        let mut buffer = SampleBuffer::new(decoded_buf.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded_buf);

        Ok(Self {
            reader,
            decoder,
            offset: 0,
            buffer,
            spec,
        })
    }

    fn next_buffer(&mut self) -> Option<SampleBuffer<i16>> {
        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(e) => {
                    log::debug!("stream: no more packets: {}", e);
                    return None;
                }
            };

            match self.decoder.decode(&packet) {
                Ok(decoded) => {
                    let mut buffer =
                        SampleBuffer::new(decoded.capacity() as u64, *decoded.spec());
                    buffer.copy_interleaved_ref(decoded);

                    return Some(buffer);
                }
                // Corrupt frames happen on live streams, skip them.
                Err(SymphoniaError::DecodeError(e)) => {
                    log::debug!("stream: skipping packet: {}", e);
                }
                Err(e) => {
                    log::warn!("stream: decode failed: {}", e);
                    return None;
                }
            }
        }
    }
}

impl Source for StreamDecoder {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.buffer.samples().len())
    }

    fn channels(&self) -> u16 {
        u16::try_from(self.spec.channels.count()).unwrap_or(u16::MAX)
    }

    fn sample_rate(&self) -> u32 {
        self.spec.rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

impl Iterator for StreamDecoder {
    type Item = i16;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset == self.buffer.len() {
            self.buffer = self.next_buffer()?;
            self.offset = 0;
        }

        let sample = self.buffer.samples()[self.offset];
        self.offset += 1;

        Some(sample)
    }
}

impl fmt::Debug for StreamDecoder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("offset", &self.offset)
            .field("buffer", &self.buffer.len())
            .field("spec", &self.spec)
            .finish()
    }
}
