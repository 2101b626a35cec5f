//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

use crate::constants::DEFAULT_SIGNIFICANT_BITS;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可以把一张图像藏进另一张无损格式图像 (如 PNG, BMP) 的低位中，也可以按位深逐一扫描图像以暴力还原可能隐藏的内容。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可以把一张图像藏进另一张无损格式图像 (如 PNG, BMP) 的低位中，也可以按位深逐一扫描图像以暴力还原可能隐藏的内容。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入)、scan (扫描) 和 pipeline (嵌入后立即扫描)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把载荷图像嵌入宿主图像的低位中，生成载体图像。
    Embed(EmbedArgs),

    /// 在给定的位深区间上逐一提取并归一化图像的低位，供人工判断是否藏有内容。
    Scan(ScanArgs),

    /// 先嵌入再扫描：对刚生成的载体图像立即执行一次完整扫描。
    Pipeline(PipelineArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 宿主图像的文件路径，其高位保持不变 (如 PNG, BMP)。
    #[arg(short = 'i', long)]
    pub host: PathBuf,

    /// 载荷图像的文件路径，其低位会被写入宿主图像。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 嵌入时使用的低位位数 (0 到 8)。
    #[arg(short, long, default_value_t = DEFAULT_SIGNIFICANT_BITS)]
    pub bits: u32,

    /// 保存载体图像的输出路径。未指定时在宿主图像旁生成 carrier_<宿主文件名>.png。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时直接覆盖，不再报错。
    #[arg(short, long)]
    pub force: bool,
}

/// 'scan' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// 要扫描的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 扫描的最低位深 (含)。
    #[arg(short, long, default_value_t = 1)]
    pub lower: u32,

    /// 扫描的最高位深 (含)。
    #[arg(short, long, default_value_t = 8)]
    pub upper: u32,

    /// 保存扫描结果的目录。文件名为对应掩码的二进制字面量，如 0b11.png。
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// 目标文件已存在时直接覆盖，不再报错。
    #[arg(short, long)]
    pub force: bool,
}

/// 'pipeline' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct PipelineArgs {
    /// 宿主图像的文件路径，其高位保持不变 (如 PNG, BMP)。
    #[arg(short = 'i', long)]
    pub host: PathBuf,

    /// 载荷图像的文件路径，其低位会被写入宿主图像。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 嵌入时使用的低位位数 (0 到 8)。
    #[arg(short, long, default_value_t = DEFAULT_SIGNIFICANT_BITS)]
    pub bits: u32,

    /// 扫描的最低位深 (含)。
    #[arg(short, long, default_value_t = 1)]
    pub lower: u32,

    /// 扫描的最高位深 (含)。
    #[arg(short, long, default_value_t = 8)]
    pub upper: u32,

    /// 保存载体图像与扫描结果的目录。
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// 目标文件已存在时直接覆盖，不再报错。
    #[arg(short, long)]
    pub force: bool,
}
