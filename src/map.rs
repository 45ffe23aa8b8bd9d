//! Office map markers.
//!
//! Projects office coordinates onto the map's SVG view box with the Equal
//! Earth projection, scales them to the rendered map, and turns the marker
//! under the pointer into a popover [`Trigger`].
//!
//! Which offices share a marker is decided by the caller: a
//! [`MarkerGroup`] is static data, never computed here.

use crate::geometry::{Point, Rect, Size};
use crate::popover::Trigger;

// Equal Earth polynomial coefficients (Šavrič, Patterson & Jenny, 2018).
const A1: f64 = 1.340_264;
const A2: f64 = -0.081_106;
const A3: f64 = 0.000_893;
const A4: f64 = 0.003_796;

/// An office location.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name: String,
    pub address: String,
    /// Degrees north.
    pub lat: f64,
    /// Degrees east.
    pub lng: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            lat,
            lng,
        }
    }

    /// Popover text lines: name, then address.
    #[must_use]
    pub fn lines(&self) -> [&str; 2] {
        [self.name.as_str(), self.address.as_str()]
    }
}

/// Offices drawn as one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerGroup {
    pub id: String,
    pub locations: Vec<Location>,
}

impl MarkerGroup {
    pub fn new(id: impl Into<String>, locations: Vec<Location>) -> Self {
        Self {
            id: id.into(),
            locations,
        }
    }

    pub fn single(id: impl Into<String>, location: Location) -> Self {
        Self::new(id, vec![location])
    }
}

/// Equal Earth projection onto an SVG view box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub scale: f64,
    /// View-box point that (0°, 0°) maps to.
    pub translate: (f64, f64),
    pub view_box: Size,
}

impl Default for Projection {
    fn default() -> Self {
        Self::for_view_box(Size::new(800.0, 600.0), 150.0)
    }
}

impl Projection {
    /// Projection centred in `view_box`.
    #[must_use]
    pub fn for_view_box(view_box: Size, scale: f64) -> Self {
        Self {
            scale,
            translate: (f64::from(view_box.width) / 2.0, f64::from(view_box.height) / 2.0),
            view_box,
        }
    }

    /// Project longitude/latitude (degrees) to view-box coordinates.
    #[must_use]
    pub fn project(&self, lng: f64, lat: f64) -> Point {
        let lambda = lng.to_radians();
        let phi = lat.to_radians();
        let m = 3f64.sqrt() / 2.0;
        let l = (m * phi.sin()).asin();
        let l2 = l * l;
        let l6 = l2 * l2 * l2;
        let x = lambda * l.cos() / (m * (A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2)));
        let y = l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2));
        Point::new(
            (self.translate.0 + self.scale * x) as f32,
            (self.translate.1 - self.scale * y) as f32,
        )
    }
}

/// Projected markers for a set of groups.
#[derive(Clone, Debug)]
pub struct MarkerLayout {
    groups: Vec<MarkerGroup>,
    /// One anchor per group, in view-box coordinates.
    anchors: Vec<Point>,
    projection: Projection,
}

impl MarkerLayout {
    #[must_use]
    pub fn new(groups: Vec<MarkerGroup>, projection: Projection) -> Self {
        let anchors = groups
            .iter()
            .map(|group| group_anchor(group, &projection))
            .collect();
        Self {
            groups,
            anchors,
            projection,
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[MarkerGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Marker anchor in view-box coordinates.
    #[must_use]
    pub fn anchor(&self, index: usize) -> Option<Point> {
        self.anchors.get(index).copied()
    }

    /// Map a view-box point to page space for a map rendered into `rendered`.
    ///
    /// The view box is scaled uniformly to fit and centred, as SVG's default
    /// `xMidYMid meet` does.
    #[must_use]
    pub fn to_page(&self, point: Point, rendered: Rect) -> Point {
        let view = self.projection.view_box;
        if view.is_degenerate() || rendered.is_degenerate() {
            return Point::new(rendered.left + point.x, rendered.top + point.y);
        }
        let scale = (rendered.width / view.width).min(rendered.height / view.height);
        let offset_x = rendered.left + (rendered.width - view.width * scale) / 2.0;
        let offset_y = rendered.top + (rendered.height - view.height * scale) / 2.0;
        Point::new(offset_x + point.x * scale, offset_y + point.y * scale)
    }

    /// Popover trigger for marker `index` on a map rendered into `rendered`.
    ///
    /// Groups of one produce a single payload, larger groups a group payload.
    #[must_use]
    pub fn trigger(&self, index: usize, rendered: Rect) -> Option<Trigger<Location>> {
        let group = self.groups.get(index)?;
        let point = self.to_page(self.anchors[index], rendered);
        let trigger = match group.locations.as_slice() {
            [only] => Trigger::single(group.id.clone(), point, only.clone()),
            many => Trigger::group(group.id.clone(), point, many.to_vec()),
        };
        Some(trigger)
    }

    /// Nearest marker within `radius` page pixels of `pointer`.
    #[must_use]
    pub fn hit_test(&self, pointer: Point, rendered: Rect, radius: f32) -> Option<usize> {
        let limit = radius * radius;
        self.anchors
            .iter()
            .enumerate()
            .map(|(i, anchor)| (i, self.to_page(*anchor, rendered).distance_sq(pointer)))
            .filter(|(_, d)| *d <= limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

fn group_anchor(group: &MarkerGroup, projection: &Projection) -> Point {
    if group.locations.is_empty() {
        return Point::new(projection.translate.0 as f32, projection.translate.1 as f32);
    }
    let n = group.locations.len() as f32;
    let (sx, sy) = group
        .locations
        .iter()
        .map(|loc| projection.project(loc.lng, loc.lat))
        .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// The group's offices, with the two Nasr City entries sharing a marker.
#[must_use]
pub fn cpd_office_groups() -> Vec<MarkerGroup> {
    vec![
        MarkerGroup::single(
            "rotterdam",
            Location::new(
                "Rotterdam Office",
                "10th Floor, Weena 290, Rotterdam, Netherlands",
                51.9244,
                4.4777,
            ),
        ),
        MarkerGroup::new(
            "cairo-nasr-city",
            vec![
                Location::new(
                    "Nasr City – Samir Abd El-Raouf (21)",
                    "Samir Abd El-Raouf, Al Manteqah Al Thamenah, Nasr City, Cairo, Egypt",
                    30.052_268_1,
                    31.346_347_8,
                ),
                Location::new(
                    "8th District, Nasr City, Cairo",
                    "8th District, 21 Samir Abd El-Raouf St, 2nd Floor, Nasr City, Cairo, Egypt",
                    30.052_26,
                    31.346_34,
                ),
            ],
        ),
        MarkerGroup::single(
            "kafr-el-shaikh-mottaheda",
            Location::new(
                "Al-Mottaheda Tower, Kafr El-Shaikh",
                "Al-Mottaheda Tower, 2nd & 9th Floor, Kafr El-Shaikh, Egypt",
                31.561_079_2,
                31.081_318_5,
            ),
        ),
        MarkerGroup::single(
            "kafr-el-shaikh-gadallah",
            Location::new(
                "Gadallah Tower, Kafr El-Shaikh",
                "Gadallah Tower, 3rd & 4th Floor, Kafr El-Shaikh, Egypt",
                31.558_473_7,
                31.081_636_4,
            ),
        ),
        MarkerGroup::single(
            "riyadh-malaz",
            Location::new(
                "Al Malaz, Riyadh",
                "Al Malaz, Riyadh, Saudi Arabia",
                24.662_444_6,
                46.728_776_1,
            ),
        ),
        MarkerGroup::single(
            "riyadh-north-ring",
            Location::new(
                "Office 17, North Ring Road, Riyadh",
                "Office 17, North Ring Road, Al Wady Dist, Exit 6, Riyadh, Saudi Arabia",
                24.766_648_4,
                46.705_051_4,
            ),
        ),
    ]
}
