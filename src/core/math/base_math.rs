use super::Point;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use wall_overlap::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Returns the point on segment `a` to `b` closest to `p`, clamped to the
/// segment end points.
///
/// Ties and degenerate segments resolve toward `a`.
///
/// # Examples
///
/// ```
/// # use wall_overlap::core::math::*;
/// let a = Point::new(0, 0);
/// let b = Point::new(100, 0);
/// assert_eq!(closest_point_on_segment(Point::new(40, 30), a, b), Point::new(40, 0));
/// assert_eq!(closest_point_on_segment(Point::new(-20, 5), a, b), a);
/// assert_eq!(closest_point_on_segment(Point::new(300, 5), a, b), b);
/// ```
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let direction = b - a;
    let direction_length2 = direction.length_squared();
    if direction_length2 <= 0 {
        return a;
    }

    let projected = (p - a).dot(direction);
    if projected <= 0 {
        return a;
    }
    if projected >= direction_length2 {
        return b;
    }

    Point::new(
        a.x + (projected as i128 * direction.x as i128 / direction_length2 as i128) as i64,
        a.y + (projected as i128 * direction.y as i128 / direction_length2 as i128) as i64,
    )
}
