/// 8 位 RGB 通道的最大可见强度。
/// 归一化时把提取出的低位按 `RGB_RANGE / depth` 的系数放大到这个范围。
pub const RGB_RANGE: u32 = 0b1111_1111;

/// 单个颜色通道的位宽 (比特)。
/// 掩码宽度和扫描深度都不能超过它，否则对 8 位通道没有意义。
pub const CHANNEL_BITS: u32 = 8;

/// 嵌入时默认使用的低位位数。
/// 2 位足以藏下可辨认的轮廓，同时对宿主图像的改动几乎不可见。
pub const DEFAULT_SIGNIFICANT_BITS: u32 = 2;
