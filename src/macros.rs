/// Macro used for implementing the polygon constructor macro. Used for
/// extracting macro repetition count for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a closed polygon with the vertexes given as a list of (x, y)
/// tuples.
///
/// # Examples
///
/// ```
/// # use wall_overlap::polygon;
/// # use wall_overlap::core::math::Point;
/// let poly = polygon![(0, 0), (1000, 0), (1000, 100), (0, 100)];
/// assert_eq!(poly.vertex_count(), 4);
/// assert_eq!(poly[2], Point::new(1000, 100));
/// ```
#[macro_export]
macro_rules! polygon {
    ($( $v:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($v) ())),*]);
            let mut poly = $crate::polygon::Polygon::with_capacity(size);
            $(
                poly.add($v.0, $v.1);
            )*
            poly
        }
    };
}
