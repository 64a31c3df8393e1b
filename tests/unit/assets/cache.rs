use std::{
    io::Cursor,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use super::*;
use crate::assets::loader::ArtworkLoader;
use crate::foundation::error::{QuirlError, QuirlResult};

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, vec![0, 0, 0, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

struct CountingLoader {
    calls: AtomicUsize,
    delay: Duration,
    fail: bool,
}

impl CountingLoader {
    fn new(delay: Duration, fail: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
            fail,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ArtworkLoader for CountingLoader {
    fn fetch(&self, _rel_path: &str) -> QuirlResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.fail {
            return Err(QuirlError::asset_load("offline"));
        }
        Ok(png_bytes())
    }
}

#[test]
fn second_lookup_hits_the_cache() {
    let cache = ArtworkCache::new(Duration::from_secs(1));
    let loader = CountingLoader::new(Duration::ZERO, false);

    let a = cache.get_or_load("bag", "frames/bag.png", &loader).unwrap();
    let b = cache.get_or_load("bag", "frames/bag.png", &loader).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(loader.calls(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn failures_are_not_cached() {
    let cache = ArtworkCache::new(Duration::from_secs(1));
    let loader = CountingLoader::new(Duration::ZERO, true);

    assert!(cache.get_or_load("bag", "frames/bag.png", &loader).is_err());
    assert!(cache.get_or_load("bag", "frames/bag.png", &loader).is_err());
    assert_eq!(loader.calls(), 2);
    assert!(cache.is_empty());
}

#[test]
fn concurrent_requests_share_one_load() {
    let cache = Arc::new(ArtworkCache::new(Duration::from_secs(5)));
    let loader = Arc::new(CountingLoader::new(Duration::from_millis(100), false));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let cache = cache.clone();
        let loader = loader.clone();
        handles.push(std::thread::spawn(move || {
            cache.get_or_load("bag", "frames/bag.png", loader.as_ref())
        }));
    }
    for h in handles {
        assert!(h.join().unwrap().is_ok());
    }

    assert_eq!(loader.calls(), 1);
}

#[test]
fn waiters_time_out_instead_of_hanging() {
    let cache = Arc::new(ArtworkCache::new(Duration::from_millis(50)));
    let loader = Arc::new(CountingLoader::new(Duration::from_millis(400), false));

    let first = {
        let cache = cache.clone();
        let loader = loader.clone();
        std::thread::spawn(move || cache.get_or_load("bag", "frames/bag.png", loader.as_ref()))
    };

    // Give the first load time to claim the in-flight slot.
    std::thread::sleep(Duration::from_millis(100));
    let waiter = cache.get_or_load("bag", "frames/bag.png", loader.as_ref());
    assert!(matches!(waiter, Err(QuirlError::AssetLoad(_))));

    // The original load still completes and populates the cache.
    assert!(first.join().unwrap().is_ok());
    assert_eq!(cache.len(), 1);
}

#[test]
fn distinct_frames_load_independently() {
    let cache = ArtworkCache::new(Duration::from_secs(1));
    let loader = CountingLoader::new(Duration::ZERO, false);

    cache.get_or_load("bag", "frames/bag.png", &loader).unwrap();
    cache.get_or_load("gift", "frames/gift.png", &loader).unwrap();
    assert_eq!(loader.calls(), 2);
    assert_eq!(cache.len(), 2);
}
