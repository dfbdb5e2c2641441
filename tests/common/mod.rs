#![allow(dead_code)]

use image::{Rgb, RgbImage};
use matching_viewer::viewer::{DisplaySurface, InputEvent, InputSource};
use matching_viewer::*;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

pub fn create_test_image(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

pub fn create_gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 2 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Coordinates of every pixel that differs from `background`.
pub fn painted_pixels(image: &RgbImage, background: Rgb<u8>) -> HashSet<(u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| **p != background)
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Two 100x50 images, three points each, one unmatched entry in the middle.
pub fn example_model() -> MatchingModel {
    let mut model = MatchingModel::new();
    model.set_images(create_test_image(100, 50, 128), create_test_image(100, 50, 128));
    model.set_point_sets(
        vec![Point2::new(10, 10), Point2::new(20, 25), Point2::new(30, 40)],
        vec![Point2::new(15, 12), Point2::new(50, 30), Point2::new(80, 45)],
    );
    model
        .set_matching(
            vec![
                Correspondence::new(0, 0),
                Correspondence::unmatched(1),
                Correspondence::new(2, 1),
            ],
            vec![0.1, 0.2, 0.3],
        )
        .unwrap();
    model
}

/// Model with `count` identity correspondences on small blank images.
pub fn model_with_correspondences(count: usize) -> MatchingModel {
    let mut model = MatchingModel::new();
    model.set_images(create_test_image(40, 30, 0), create_test_image(40, 30, 0));
    let points: Vec<Point2> = (0..count as i32).map(|i| Point2::new(i % 40, i % 30)).collect();
    model.set_point_sets(points.clone(), points);
    model
        .set_matching(
            (0..count as i64).map(|m| Correspondence::new(m, m)).collect(),
            (0..count).map(|m| m as f64 * 0.5).collect(),
        )
        .unwrap();
    model
}

/// Frontend replaying a fixed list of events and recording what was shown.
#[derive(Default)]
pub struct ScriptedFrontend {
    pub events: VecDeque<InputEvent>,
    pub captions: Vec<String>,
    pub frames: Vec<RgbImage>,
    pub fullscreen_toggles: usize,
    pub timeouts: Vec<Option<Duration>>,
}

impl ScriptedFrontend {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl DisplaySurface for ScriptedFrontend {
    fn present(&mut self, frame: &RgbImage, caption: &str) -> Result<()> {
        self.frames.push(frame.clone());
        self.captions.push(caption.to_string());
        Ok(())
    }

    fn toggle_fullscreen(&mut self) -> Result<()> {
        self.fullscreen_toggles += 1;
        Ok(())
    }
}

impl InputSource for ScriptedFrontend {
    fn next_event(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>> {
        self.timeouts.push(timeout);
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            // script exhausted: quit interactive loops, time out single-shot ones
            None if timeout.is_some() => Ok(None),
            None => Ok(Some(InputEvent::Quit)),
        }
    }
}
