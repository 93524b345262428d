use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ProximityLinker;
use crate::core::math::Point;
use crate::error::WallOverlapError;

impl ProximityLinker {
    /// Write an SVG rendering of the link graph for debugging: polygon
    /// outlines, every ring node, and one line per link — green for ending
    /// links (`dist` equal to the proximity distance), red for closer
    /// primary links.
    pub fn write_proximity_svg<P: AsRef<Path>>(&self, path: P) -> Result<(), WallOverlapError> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);

        let (min, max) = self.bounds();
        let margin = 200;
        let width = (max.x - min.x) + 2 * margin;
        let height = (max.y - min.y) + 2 * margin;
        let stroke = (width.max(height) / 512).max(1);

        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="{} {} {} {}">"#,
            min.x - margin,
            min.y - margin,
            width,
            height,
        )?;

        for ring in 0..self.rings.ring_count() {
            write!(out, r#"<polygon fill="none" stroke="black" stroke-width="{stroke}" points=""#)?;
            for node in self.rings.iter_ring(ring) {
                let p = self.rings.point(node);
                write!(out, "{},{} ", p.x, p.y)?;
            }
            writeln!(out, r#""/>"#)?;
            for node in self.rings.iter_ring(ring) {
                let p = self.rings.point(node);
                writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="black"/>"#,
                    p.x,
                    p.y,
                    stroke * 2
                )?;
            }
        }

        for link in self.primary.iter().chain(self.endings.iter()) {
            let a = self.rings.point(link.a);
            let b = self.rings.point(link.b);
            let color = if link.dist == self.proximity_distance {
                "green"
            } else {
                "red"
            };
            writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                a.x, a.y, b.x, b.y, color, stroke
            )?;
        }

        writeln!(out, "</svg>")?;
        out.flush()?;
        Ok(())
    }

    fn bounds(&self) -> (Point, Point) {
        let mut min = Point::new(i64::MAX, i64::MAX);
        let mut max = Point::new(i64::MIN, i64::MIN);
        let mut any = false;
        for ring in 0..self.rings.ring_count() {
            for node in self.rings.iter_ring(ring) {
                let p = self.rings.point(node);
                min = Point::new(min.x.min(p.x), min.y.min(p.y));
                max = Point::new(max.x.max(p.x), max.y.max(p.y));
                any = true;
            }
        }
        if !any {
            return (Point::new(0, 0), Point::new(0, 0));
        }
        (min, max)
    }
}
