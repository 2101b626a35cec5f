//! # 命令处理逻辑模块
//!
//! 包含处理 `embed`、`scan` 和 `pipeline` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{EmbedArgs, PipelineArgs, ScanArgs};
use crate::steganography::{bit_mask, embed, process};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Embed' 命令的执行逻辑。
///
/// 负责读取宿主与载荷图像、调用核心嵌入函数把载荷的低位写进宿主的低位，
/// 最后将载体图像保存到目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、位数与覆盖开关的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码宿主/载荷图像。
/// * 两张图像的尺寸不一致，或位数超过 8。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入载体图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let host = load_rgb_image(&args.host)?;
    let payload = load_rgb_image(&args.payload)?;

    let carrier = embed(&host, &payload, args.bits).with_context(|| {
        format!(
            "Failed to embed '{}' into '{}' using the lowest {} bits.",
            args.payload.to_string_lossy().red().bold(),
            args.host.to_string_lossy().red().bold(),
            args.bits.to_string().green()
        )
    })?;

    let dest = args
        .dest
        .unwrap_or_else(|| default_carrier_path(&args.host));
    ensure_writable(&dest, args.force)?;

    carrier.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The payload has been successfully embedded and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Scan' 命令的执行逻辑。
///
/// 负责读取待分析的图像，在 `[lower, upper]` 位深区间上逐一提取低位并归一化，
/// 然后把每个位深的结果图像保存到输出目录，文件名为对应掩码的二进制字面量。
///
/// # Arguments
///
/// * `args` - 包含输入路径、位深区间与输出目录的 `ScanArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入图像。
/// * 区间内存在超过 8 的位深。
/// * 某个输出文件已存在且未指定 `--force`，或无法写入输出目录。
pub fn handle_scan(args: ScanArgs) -> Result<()> {
    let image = load_rgb_image(&args.image)?;

    // 命令行上的区间是闭区间，这里转成半开区间交给核心函数
    let results = process(&image, args.lower, args.upper.saturating_add(1)).with_context(|| {
        format!(
            "Failed to scan '{}' over the bit depth range {}..={}.",
            args.image.to_string_lossy().red().bold(),
            args.lower.to_string().green(),
            args.upper.to_string().green()
        )
    })?;

    save_scan_results(&results, &args.output_dir, args.force)?;

    println!(
        "Scanned {} bit depth(s); the results have been saved to: {}",
        results.len().to_string().green(),
        args.output_dir.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Pipeline' 命令的执行逻辑。
///
/// 先执行一次嵌入，把生成的载体图像保存到输出目录，随后直接对内存中的
/// 载体图像执行扫描，用于端到端验证嵌入是否能在某个位深下被还原。
///
/// # Arguments
///
/// * `args` - 包含宿主/载荷路径、位数、位深区间与输出目录的 `PipelineArgs` 结构体。
///
/// # Errors
///
/// 嵌入或扫描阶段的任何失败都会使整个流水线失败，错误语义与
/// [`handle_embed`] 和 [`handle_scan`] 相同。
pub fn handle_pipeline(args: PipelineArgs) -> Result<()> {
    let host = load_rgb_image(&args.host)?;
    let payload = load_rgb_image(&args.payload)?;

    let carrier = embed(&host, &payload, args.bits).with_context(|| {
        format!(
            "Failed to embed '{}' into '{}' using the lowest {} bits.",
            args.payload.to_string_lossy().red().bold(),
            args.host.to_string_lossy().red().bold(),
            args.bits.to_string().green()
        )
    })?;

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Unable to create output directory: {}",
            args.output_dir.to_string_lossy().red().bold()
        )
    })?;

    let carrier_path = args.output_dir.join(default_carrier_name(&args.host));
    ensure_writable(&carrier_path, args.force)?;
    carrier.save(&carrier_path).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            carrier_path.to_string_lossy().red().bold()
        )
    })?;

    let results = process(&carrier, args.lower, args.upper.saturating_add(1)).with_context(|| {
        format!(
            "Failed to scan the freshly embedded carrier over the bit depth range {}..={}.",
            args.lower.to_string().green(),
            args.upper.to_string().green()
        )
    })?;

    save_scan_results(&results, &args.output_dir, args.force)?;

    println!(
        "The carrier and {} scan result(s) have been saved to: {}",
        results.len().to_string().green(),
        args.output_dir.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 从磁盘读取并解码一张图像，统一转成三通道 8 位像素缓冲。
fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok(image.to_rgb8())
}

/// 把扫描结果逐一保存到输出目录。
/// 每个位深的文件名是对应掩码的二进制字面量，如位深 2 对应 0b11.png。
fn save_scan_results(
    results: &BTreeMap<u32, RgbImage>,
    output_dir: &Path,
    force: bool,
) -> Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Unable to create output directory: {}",
            output_dir.to_string_lossy().red().bold()
        )
    })?;

    for (&depth, image) in results {
        let mask = bit_mask(depth).with_context(|| {
            format!(
                "Failed to rebuild the mask for bit depth {}.",
                depth.to_string().red().bold()
            )
        })?;

        let path = output_dir.join(format!("0b{mask:b}.png"));
        ensure_writable(&path, force)?;

        image.save(&path).with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
    }

    Ok(())
}

/// 检查输出路径是否可以安全写入：文件已存在且未指定 `--force` 时报错。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );

    Ok(())
}

/// 根据宿主图像文件名推导默认的载体文件名 (carrier_<宿主文件名>.png)。
fn default_carrier_name(host: &Path) -> String {
    let stem = host
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    format!("carrier_{stem}.png")
}

/// 默认的载体输出路径：与宿主图像同目录。
fn default_carrier_path(host: &Path) -> PathBuf {
    host.with_file_name(default_carrier_name(host))
}
