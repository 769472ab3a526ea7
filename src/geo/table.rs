use crate::models::District;

#[derive(Debug, Clone, Copy)]
pub struct DistrictEntry {
    pub name: &'static str,
    pub offset: i32,
}

impl DistrictEntry {
    pub fn to_district(&self) -> District {
        District::new(self.name, self.offset)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Division {
    pub name: &'static str,
    pub icon: &'static str,
    pub districts: &'static [DistrictEntry],
}

const fn d(name: &'static str, offset: i32) -> DistrictEntry {
    DistrictEntry { name, offset }
}

/// Divisions of Bangladesh with per-district minute offsets against Dhaka.
pub const DIVISIONS: &[Division] = &[
    Division {
        name: "ঢাকা",
        icon: "🕌",
        districts: &[
            d("ঢাকা", 0),
            d("গাজীপুর", 0),
            d("নারায়ণগঞ্জ", 0),
            d("মানিকগঞ্জ", 1),
            d("নরসিংদী", -1),
            d("ফরিদপুর", 2),
            d("গোপালগঞ্জ", 3),
            d("টাঙ্গাইল", 1),
        ],
    },
    Division {
        name: "চট্টগ্রাম",
        icon: "⚓",
        districts: &[
            d("চট্টগ্রাম", -5),
            d("কক্সবাজার", -6),
            d("কুমিল্লা", -3),
            d("নোয়াখালী", -4),
            d("ফেনী", -4),
            d("চাঁদপুর", -2),
        ],
    },
    Division {
        name: "রাজশাহী",
        icon: "🥭",
        districts: &[
            d("রাজশাহী", 6),
            d("বগুড়া", 4),
            d("পাবনা", 5),
            d("নাটোর", 5),
            d("সিরাজগঞ্জ", 3),
        ],
    },
    Division {
        name: "খুলনা",
        icon: "🐅",
        districts: &[
            d("খুলনা", 5),
            d("যশোর", 6),
            d("সাতক্ষীরা", 7),
            d("বাগেরহাট", 5),
            d("কুষ্টিয়া", 5),
            d("ঝিনাইদহ", 5),
        ],
    },
    Division {
        name: "সিলেট",
        icon: "☕",
        districts: &[d("সিলেট", -6), d("সুনামগঞ্জ", -5), d("হবিগঞ্জ", -4)],
    },
    Division {
        name: "বরিশাল",
        icon: "⛴️",
        districts: &[d("বরিশাল", 2), d("পটুয়াখালী", 2), d("ভোলা", 1)],
    },
    Division {
        name: "রংপুর",
        icon: "🏛️",
        districts: &[d("রংপুর", 6), d("দিনাজপুর", 8), d("পঞ্চগড়", 9)],
    },
    Division {
        name: "ময়মনসিংহ",
        icon: "🌲",
        districts: &[d("ময়মনসিংহ", 0), d("শেরপুর", 1), d("জামালপুর", 1)],
    },
];

/// Dhaka, the first district of the first division.
pub fn default_district() -> District {
    DIVISIONS[0].districts[0].to_district()
}

pub fn all_districts() -> impl Iterator<Item = &'static DistrictEntry> {
    DIVISIONS.iter().flat_map(|div| div.districts.iter())
}

/// Exact lookup by district name.
pub fn find_district(name: &str) -> Option<District> {
    let name = name.trim();
    all_districts()
        .find(|e| e.name == name)
        .map(DistrictEntry::to_district)
}

/// Loose match used for reverse geocoding results: the first district (in
/// table order) whose name contains `city` or is contained by it. An empty
/// city matches nothing.
pub fn match_city(city: &str) -> Option<District> {
    let city = city.trim();
    if city.is_empty() {
        return None;
    }
    all_districts()
        .find(|e| city.contains(e.name) || e.name.contains(city))
        .map(DistrictEntry::to_district)
}

pub fn division_of(district: &District) -> Option<&'static Division> {
    DIVISIONS
        .iter()
        .find(|div| div.districts.iter().any(|e| e.name == district.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dhaka() {
        let dhaka = default_district();
        assert_eq!(dhaka.name, "ঢাকা");
        assert_eq!(dhaka.minute_offset, 0);
    }

    #[test]
    fn offsets_stay_in_supported_range() {
        for e in all_districts() {
            assert!((-9..=9).contains(&e.offset), "{} has {}", e.name, e.offset);
        }
        assert_eq!(all_districts().count(), 37);
    }

    #[test]
    fn exact_lookup() {
        assert_eq!(find_district("রাজশাহী"), Some(District::new("রাজশাহী", 6)));
        assert_eq!(find_district(" পঞ্চগড় ").map(|d| d.minute_offset), Some(9));
        assert_eq!(find_district("Kolkata"), None);
    }

    #[test]
    fn city_match_works_both_directions() {
        // Geocoder returns a longer name containing the district
        assert_eq!(
            match_city("সিলেট সদর").map(|d| d.name),
            Some("সিলেট".to_string())
        );
        // Geocoder returns a fragment of the district name
        assert_eq!(
            match_city("কক্স").map(|d| d.name),
            Some("কক্সবাজার".to_string())
        );
        assert_eq!(match_city(""), None);
        assert_eq!(match_city("   "), None);
        assert_eq!(match_city("London"), None);
    }

    #[test]
    fn finds_division() {
        let div = division_of(&District::new("দিনাজপুর", 8)).unwrap();
        assert_eq!(div.name, "রংপুর");
    }
}
