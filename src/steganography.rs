use std::collections::BTreeMap;
use std::io::{self, ErrorKind};

use image::RgbImage;

use crate::constants::{CHANNEL_BITS, RGB_RANGE};

pub fn bit_mask(size: u32) -> Result<u8, io::Error> {
    if size > CHANNEL_BITS {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "The mask width exceeds the 8-bit channel range.",
        ));
    }

    Ok(((1u16 << size) - 1) as u8)
}

pub fn embed(
    host: &RgbImage,
    payload: &RgbImage,
    significant_bits: u32,
) -> Result<RgbImage, io::Error> {
    if host.dimensions() != payload.dimensions() {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "The host and payload images must have identical dimensions.",
        ));
    }

    let low_mask = bit_mask(significant_bits)?;

    let merged: Vec<u8> = host
        .as_raw()
        .iter()
        .zip(payload.as_raw().iter())
        .map(|(&host_byte, &payload_byte)| (host_byte & !low_mask) | (payload_byte & low_mask))
        .collect();

    let (width, height) = host.dimensions();
    RgbImage::from_raw(width, height, merged).ok_or_else(|| {
        io::Error::new(
            ErrorKind::InvalidInput,
            "The merged pixel buffer does not match the host image dimensions.",
        )
    })
}

pub fn extract_normalized(image: &RgbImage, depth: u32) -> Result<RgbImage, io::Error> {
    let low_mask = bit_mask(depth)?;
    // 深度为 0 时提取结果恒为 0，原样保留，缩放系数取 1
    let scale = if depth == 0 { 1 } else { (RGB_RANGE / depth) as u16 };

    let normalized: Vec<u8> = image
        .as_raw()
        .iter()
        .map(|&byte| {
            let extracted = (byte & low_mask) as u16;
            // 乘积可能超出字节范围 (如 3 * 127 = 381)，写回时饱和到 255
            (extracted * scale).min(RGB_RANGE as u16) as u8
        })
        .collect();

    let (width, height) = image.dimensions();
    RgbImage::from_raw(width, height, normalized).ok_or_else(|| {
        io::Error::new(
            ErrorKind::InvalidInput,
            "The normalized pixel buffer does not match the input image dimensions.",
        )
    })
}

pub fn process(
    image: &RgbImage,
    lower: u32,
    upper: u32,
) -> Result<BTreeMap<u32, RgbImage>, io::Error> {
    let mut results = BTreeMap::new();

    // lower >= upper 时区间为空，返回空映射而不是错误
    for depth in lower..upper {
        results.insert(depth, extract_normalized(image, depth)?);
    }

    Ok(results)
}
