//! 合成フレームカメラ
//!
//! 実機カメラのないデモ・テスト環境向け。起動は常に成功する。

use super::{encode_jpeg_data_url, Camera};
use crate::error::{LitterLogError, Result};
use image::{Rgb, RgbImage};

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;

/// グラデーションのテストフレームを生成
pub(crate) fn generate_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        Rgb([r, g, 96])
    })
}

/// 合成フレームを返すカメラアダプタ
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    streaming: bool,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            streaming: false,
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Camera for SyntheticCamera {
    fn start(&mut self) -> Result<()> {
        self.streaming = true;
        Ok(())
    }

    fn captured_frame(&mut self) -> Result<String> {
        if !self.streaming {
            return Err(LitterLogError::Camera("カメラが起動していません".into()));
        }
        let frame = generate_frame(self.width, self.height);
        encode_jpeg_data_url(&frame.into())
    }

    fn stop(&mut self) {
        self.streaming = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::DATA_URL_PREFIX;

    #[test]
    fn test_synthetic_camera_lifecycle() {
        let mut camera = SyntheticCamera::default();
        assert!(camera.captured_frame().is_err());

        camera.start().unwrap();
        let data_url = camera.captured_frame().unwrap();
        assert!(data_url.starts_with(DATA_URL_PREFIX));

        camera.stop();
        assert!(camera.captured_frame().is_err());
    }

    #[test]
    fn test_stop_without_start_is_safe() {
        let mut camera = SyntheticCamera::new(8, 8);
        camera.stop();
        camera.stop();
        assert!(camera.start().is_ok());
    }
}
