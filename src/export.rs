use crate::history::History;
use std::io::{self, Write};

pub const CSV_HEADER: &str = "step,time,body,mass,x,y,z,vx,vy,vz,ax,ay,az";

/// Writes every snapshot as CSV, one row per body.
pub fn write_csv<W: Write>(history: &History, mut out: W) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for snapshot in history.iter() {
        for (j, body) in snapshot.bodies().enumerate() {
            let (p, v, a) = (body.position(), body.velocity(), body.acceleration());
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                snapshot.index(),
                snapshot.time(),
                j,
                body.mass(),
                p.x,
                p.y,
                p.z,
                v.x,
                v.y,
                v.z,
                a.x,
                a.y,
                a.z
            )?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{body::Body, simulation::Simulator};
    use ultraviolet::DVec3;

    #[test]
    fn one_row_per_body_per_snapshot() {
        let bodies = vec![
            Body::new(2.0, DVec3::new(1.0, 2.0, 3.0), DVec3::zero()).unwrap(),
            Body::new(1.0, DVec3::new(-1.0, 0.0, 0.0), DVec3::zero()).unwrap(),
        ];
        let mut sim = Simulator::with_bodies(bodies, 0.0, 1.0, 2).unwrap();
        sim.run().unwrap();

        let mut buf = Vec::new();
        write_csv(sim.history(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 1 + 3 * 2);
        assert_eq!(lines[1], "0,0,0,2,1,2,3,0,0,0,0,0,0");
        assert!(lines[6].starts_with("2,1,1,1,"));
    }
}
