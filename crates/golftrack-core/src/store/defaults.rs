use crate::model::{Course, Hole};

/// (par, yardage) for holes 1 through 18.
type Layout = [(u32, u32); 18];

const PEBBLE_BEACH: Layout = [
    (4, 377), (5, 502), (4, 390), (4, 331), (3, 188), (5, 523),
    (3, 106), (4, 416), (4, 466), (4, 446), (4, 384), (3, 202),
    (4, 392), (5, 565), (4, 395), (4, 403), (3, 178), (5, 548),
];

const AUGUSTA_NATIONAL: Layout = [
    (4, 445), (5, 575), (4, 350), (3, 240), (4, 495), (3, 180),
    (4, 450), (5, 570), (4, 460), (4, 495), (4, 520), (3, 155),
    (5, 510), (4, 440), (5, 550), (3, 170), (4, 440), (4, 465),
];

const ST_ANDREWS_OLD: Layout = [
    (4, 376), (4, 453), (4, 397), (4, 463), (5, 568), (4, 416),
    (4, 372), (3, 178), (4, 352), (4, 342), (3, 174), (4, 348),
    (4, 465), (5, 614), (4, 455), (4, 423), (4, 495), (4, 357),
];

/// Courses a fresh store starts with.
pub fn default_courses() -> Vec<Course> {
    vec![
        build("course-1", "Pebble Beach Golf Links", &PEBBLE_BEACH),
        build("course-2", "Augusta National Golf Club", &AUGUSTA_NATIONAL),
        build("course-3", "St. Andrews Old Course", &ST_ANDREWS_OLD),
    ]
}

fn build(id: &str, name: &str, layout: &Layout) -> Course {
    let holes: Vec<Hole> = layout
        .iter()
        .zip(1u32..)
        .map(|((par, yardage), number)| Hole::new(number, *par).with_yardage(*yardage))
        .collect();
    let total_par = holes.iter().map(|h| h.par).sum();
    Course {
        id: id.to_string(),
        name: name.to_string(),
        holes,
        total_par,
    }
}
