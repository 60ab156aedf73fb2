//! ZMO CLI - MobiClip MO container tool
//!
//! Inspects MO files, pulls out elementary streams and rewrites them.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use zmo_lib::format::mo::builder::{frame_rate_for_time_base, stored_rate};
use zmo_lib::format::mo::{MoDemuxer, MoMuxer, FORMAT_NAME};
use zmo_lib::format::{detect_format_from_extension, Demuxer, Muxer};
use zmo_lib::probe::MediaProbe;
use zmo_lib::{init, Config};

#[derive(Parser)]
#[command(name = "zmo")]
#[command(about = "ZMO - MobiClip MO container tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about an MO file
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Probe a file and print its metadata
    Probe {
        /// Input file path
        input: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Write the raw payloads of one stream to a file
    Extract {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Stream index to extract (0 = video, 1 = audio)
        #[arg(short, long)]
        stream: usize,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Rewrite an MO file through the muxer
    Remux {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config {
        verbose: cli.verbose,
        debug: cli.debug,
    };
    init(config)?;

    info!("ZMO v{}", zmo_lib::VERSION);

    match cli.command {
        Commands::Info { input } => {
            info!("Getting info for: {}", input.display());
            cmd_info(&input)
        }
        Commands::Probe { input, json } => cmd_probe(&input, json),
        Commands::Extract {
            input,
            stream,
            output,
        } => {
            info!(
                "Extracting stream {} from {} to {}",
                stream,
                input.display(),
                output.display()
            );
            cmd_extract(&input, stream, &output)
        }
        Commands::Remux { input, output } => {
            info!("Remuxing {} -> {}", input.display(), output.display());
            cmd_remux(&input, &output)
        }
    }
}

fn cmd_info(input: &PathBuf) -> anyhow::Result<()> {
    let demuxer = MoDemuxer::open(input)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", input.display(), e))?;

    println!("File: {}", input.display());
    println!();

    let streams = demuxer.streams();
    println!("Streams: {}", streams.len());
    println!();

    for stream in streams {
        println!("Stream #{}:", stream.info.index);
        println!("  Type: {}", stream.info.media_type);
        println!("  Codec: {}", stream.info.codec_id);
        println!("  Time Base: {}", stream.info.time_base);

        if let Some(ref video) = stream.info.video_info {
            println!("  Resolution: {}x{}", video.width, video.height);
            println!("  Frames: {}", stream.info.duration);
            println!("  Frame Rate: {:.3} fps", stream.info.time_base.invert().to_f64());
        }

        if let Some(ref audio) = stream.info.audio_info {
            println!("  Sample Rate: {} Hz", audio.sample_rate);
            println!("  Channels: {} ({})", audio.channels(), audio.channel_layout);
        }

        println!();
    }

    if let Some(header) = demuxer.header() {
        println!("Header: {} bytes, {} chunks", header.extent, header.chunks.len());
        for chunk in &header.chunks {
            println!("  {} ({} bytes)", chunk.marker, chunk.length);
        }
    }

    Ok(())
}

fn cmd_probe(input: &PathBuf, json: bool) -> anyhow::Result<()> {
    let probe = MediaProbe::new(input)?;
    let metadata = probe.analyze()?;

    if json {
        println!("{}", metadata.to_json()?);
    } else {
        print!("{}", metadata);
    }

    Ok(())
}

fn cmd_extract(input: &PathBuf, stream_index: usize, output: &PathBuf) -> anyhow::Result<()> {
    let mut demuxer = MoDemuxer::open(input)
        .map_err(|e| anyhow::anyhow!("Failed to open input file: {}", e))?;

    let streams = demuxer.streams();
    if stream_index >= streams.len() {
        return Err(anyhow::anyhow!(
            "Invalid stream index {}. File has {} streams (0-{})",
            stream_index,
            streams.len(),
            streams.len().saturating_sub(1)
        ));
    }

    let source = &streams[stream_index];
    println!(
        "Extracting {} stream #{} ({})",
        source.info.media_type, stream_index, source.info.codec_id
    );

    let mut writer = BufWriter::new(
        File::create(output)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", output.display(), e))?,
    );

    let mut packets = 0u64;
    let mut total_bytes = 0u64;
    loop {
        let packet = match demuxer.read_packet() {
            Ok(p) => p,
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => return Err(anyhow::anyhow!("Failed to read packet: {}", e)),
        };

        if packet.stream_index != stream_index {
            continue;
        }

        writer.write_all(packet.data.as_slice())?;
        packets += 1;
        total_bytes += packet.size() as u64;
    }
    writer.flush()?;

    println!("  Packets extracted: {}", packets);
    println!("  Total data: {} KB", total_bytes / 1024);

    Ok(())
}

fn cmd_remux(input: &PathBuf, output: &PathBuf) -> anyhow::Result<()> {
    let mut demuxer = MoDemuxer::open(input)
        .map_err(|e| anyhow::anyhow!("Failed to open input file: {}", e))?;
    if detect_format_from_extension(&output.to_string_lossy()) != Some(FORMAT_NAME) {
        warn!("Output {} does not have an .mo extension", output.display());
    }
    let mut muxer = MoMuxer::create(output)?;

    for stream in demuxer.streams() {
        let mut stream = stream.clone();
        let time_base = stream.info.time_base;
        if let Some(ref mut video) = stream.info.video_info {
            video.frame_rate = frame_rate_for_time_base(time_base);
            let stored = stored_rate(video.frame_rate)?;
            if i64::from(stored) != time_base.den {
                warn!(
                    "Frame rate denominator {} cannot be kept; it will be written as {}",
                    time_base.den, stored
                );
            }
        }
        muxer.add_stream(stream)?;
    }
    muxer
        .write_header()
        .map_err(|e| anyhow::anyhow!("Failed to write header: {}", e))?;

    let mut packets = 0u64;
    loop {
        let packet = match demuxer.read_packet() {
            Ok(p) => p,
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => return Err(anyhow::anyhow!("Failed to read packet: {}", e)),
        };
        muxer
            .write_packet(&packet)
            .map_err(|e| anyhow::anyhow!("Failed to write packet: {}", e))?;
        packets += 1;
    }

    muxer
        .write_trailer()
        .map_err(|e| anyhow::anyhow!("Failed to write trailer: {}", e))?;

    println!("Remux complete!");
    println!("  Packets: {}", packets);
    println!("  Packet chunks: {}", muxer.chunks_written());
    println!("  Output size: {} bytes", muxer.bytes_written());

    Ok(())
}
