use glam::Vec3;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Overlap on all three axes, closed intervals: touching faces count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_center_size(Vec3::new(x, y, z), Vec3::ONE)
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert!(a.intersects(&unit_at(0.5, 0.5, 0.5)));
        assert!(!a.intersects(&unit_at(2.0, 0.0, 0.0)));
        // Separated on a single axis is enough to miss.
        assert!(!a.intersects(&unit_at(0.0, 0.0, 1.5)));
    }

    #[test]
    fn test_touching_faces_intersect() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(1.0, 0.0, 0.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_translated_and_center() {
        let a = unit_at(0.0, 0.0, 0.0).translated(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(a.center(), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(a.size(), Vec3::ONE);
        assert!(a.contains_point(Vec3::new(3.5, 0.5, -0.5)));
        assert!(!a.contains_point(Vec3::ZERO));
    }
}
