//! `rrem`: a minimal packer CLI over [`rres_rs::RresWriter`] (§6). A thin
//! front end, not a general asset pipeline — it reads whole files into
//! memory and wraps them in the chunk type its extension maps to.
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rres_rs::{CompressionType, EncryptionType, Payload, RresWriter, WriteOptions, WriteRequest};

#[derive(Parser, Debug)]
#[command(
    name = "rrem",
    version,
    about = "Pack files into an .rres resource container",
    disable_version_flag = true
)]
struct Cli {
    /// Print version.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Destination file.
    #[arg(short, long, default_value = "data.rres")]
    output: PathBuf,

    /// Default compression for files that don't specify their own: NONE, RLE, DEFLATE, LZ4, LZMA2, BZIP2.
    #[arg(short, long, default_value = "NONE")]
    comp: String,

    /// Skip writing the central directory chunk.
    #[arg(long)]
    no_cdir: bool,

    /// FILE[:COMP[:CIPHER[:RAW[:ID]]]] entries, one per resource.
    #[arg(required = true)]
    files: Vec<String>,
}

fn parse_compression(name: &str) -> Result<CompressionType, String> {
    match name.to_ascii_uppercase().as_str() {
        "NONE" => Ok(CompressionType::None),
        "RLE" => Ok(CompressionType::Rle),
        "DEFLATE" => Ok(CompressionType::Deflate),
        "LZ4" => Ok(CompressionType::Lz4),
        "LZMA2" => Ok(CompressionType::Lzma2),
        "BZIP2" => Ok(CompressionType::Bzip2),
        other => Err(format!("unknown compression name: {other}")),
    }
}

fn parse_cipher(name: &str) -> Result<EncryptionType, String> {
    match name.to_ascii_uppercase().as_str() {
        "NONE" => Ok(EncryptionType::None),
        "XOR" => Ok(EncryptionType::Xor),
        "AES" => Ok(EncryptionType::Aes),
        "XCHACHA20POLY1305" => Ok(EncryptionType::Xchacha20Poly1305),
        other => Err(format!("unknown cipher name: {other}")),
    }
}

fn resource_type_for(path: &str) -> [u8; 4] {
    let lower = path.to_ascii_lowercase();
    const IMAGE_EXT: &[&str] = &[".png", ".bmp", ".tga", ".gif", ".jpg", ".psd", ".hdr"];
    const TEXT_EXT: &[&str] = &[".txt", ".vs", ".fs", ".info", ".c", ".h", ".json", ".xml"];
    const AUDIO_EXT: &[&str] = &[".wav", ".mp3", ".ogg", ".flac"];

    if IMAGE_EXT.iter().any(|ext| lower.ends_with(ext)) {
        *b"IMGE"
    } else if TEXT_EXT.iter().any(|ext| lower.ends_with(ext)) {
        *b"TEXT"
    } else if AUDIO_EXT.iter().any(|ext| lower.ends_with(ext)) {
        *b"WAVE"
    } else {
        *b"RAWD"
    }
}

fn payload_for(resource_type: [u8; 4], bytes: Vec<u8>) -> Payload {
    match &resource_type {
        b"TEXT" => Payload::new(vec![bytes.len() as u32, 1, 0, 0], bytes),
        b"IMGE" => Payload::new(vec![0, 0, 0, 0], bytes),
        b"WAVE" => Payload::new(vec![0, 0, 0, 0], bytes),
        _ => Payload::new(vec![bytes.len() as u32], bytes),
    }
}

struct FileSpec {
    path: String,
    comp: Option<String>,
    cipher: Option<String>,
    raw: bool,
    id: Option<u32>,
}

fn parse_file_spec(arg: &str) -> FileSpec {
    let mut parts = arg.split(':');
    let path = parts.next().unwrap_or_default().to_string();
    let comp = parts.next().filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("auto")).map(String::from);
    let cipher = parts.next().filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("auto")).map(String::from);
    let raw = parts
        .next()
        .map(|s| s.eq_ignore_ascii_case("raw"))
        .unwrap_or(false);
    let id = parts.next().and_then(|s| s.parse::<u32>().ok());

    FileSpec { path, comp, cipher, raw, id }
}

fn build_requests(cli: &Cli) -> Result<Vec<WriteRequest>, String> {
    let mut requests = Vec::with_capacity(cli.files.len());

    for arg in &cli.files {
        let spec = parse_file_spec(arg);
        let bytes = fs::read(&spec.path).map_err(|e| format!("{}: {e}", spec.path))?;

        // Leaving these `None` when the file spec doesn't override them lets
        // `RresWriter` fall back to `WriteOptions::default_comp`/`default_cipher`.
        let compression = spec.comp.as_deref().map(parse_compression).transpose()?;
        let cipher = spec.cipher.as_deref().map(parse_cipher).transpose()?;
        let resource_type = if spec.raw {
            *b"RAWD"
        } else {
            resource_type_for(&spec.path)
        };

        requests.push(WriteRequest {
            file_name: spec.path.clone(),
            resource_type,
            id_override: spec.id,
            payload: payload_for(resource_type, bytes),
            compression,
            cipher,
        });
    }

    Ok(requests)
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let requests = build_requests(&cli)?;

    let options = WriteOptions {
        include_directory: !cli.no_cdir,
        default_comp: parse_compression(&cli.comp)?,
        default_cipher: EncryptionType::None,
        password: None,
    };

    RresWriter::write(&cli.output, &requests, &options)
        .map_err(|e| format!("failed to write {}: {e}", cli.output.display()))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("rrem: {message}");
            ExitCode::FAILURE
        }
    }
}
