use serde::{Deserialize, Serialize};
use std::fmt;

/// Прямоугольник окна в экранных координатах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WindowRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Построить из геометрии xdotool (позиция + размер)
    pub fn from_geometry(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::new(x, y, x + width as i32, y + height as i32)
    }

    /// Допустимая область для курсора: прямоугольник с отступом со всех сторон.
    /// Для окна меньше двойного отступа область вырождается в центральную точку.
    pub fn inset(&self, buffer: i32) -> Bounds {
        let (min_x, max_x) = Self::shrink(self.left, self.right, buffer);
        let (min_y, max_y) = Self::shrink(self.top, self.bottom, buffer);
        Bounds { min_x, max_x, min_y, max_y }
    }

    fn shrink(low: i32, high: i32, buffer: i32) -> (i32, i32) {
        let (min, max) = (low + buffer, high - buffer);
        if min <= max {
            (min, max)
        } else {
            let mid = low + (high - low) / 2;
            (mid, mid)
        }
    }
}

impl fmt::Display for WindowRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{},{}]", self.left, self.top, self.right, self.bottom)
    }
}

/// Границы перемещения курсора (включительно)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }

    #[cfg(test)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_and_clamp() {
        let rect = WindowRect::new(100, 100, 900, 700);
        let bounds = rect.inset(10);
        assert_eq!(bounds, Bounds { min_x: 110, max_x: 890, min_y: 110, max_y: 690 });
        assert_eq!(bounds.clamp(950, 50), (890, 110));
        assert_eq!(bounds.clamp(500, 400), (500, 400));
        assert!(bounds.contains(890, 690));
        assert!(!bounds.contains(891, 690));
    }

    #[test]
    fn test_tiny_window_collapses_to_center() {
        let bounds = WindowRect::new(0, 0, 10, 100).inset(10);
        assert_eq!((bounds.min_x, bounds.max_x), (5, 5));
        assert_eq!((bounds.min_y, bounds.max_y), (10, 90));
    }

    #[test]
    fn test_from_geometry() {
        assert_eq!(WindowRect::from_geometry(100, 50, 800, 600), WindowRect::new(100, 50, 900, 650));
    }
}
