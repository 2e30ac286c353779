// src/domain/areas.rs

use serde::Serialize;

/// A Greater Cairo neighbourhood a listing can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Area {
    pub id: u32,
    pub name: &'static str,
    pub city: &'static str,
    pub slug: &'static str,
}

const fn area(id: u32, name: &'static str, city: &'static str, slug: &'static str) -> Area {
    Area {
        id,
        name,
        city,
        slug,
    }
}

pub static AREAS: &[Area] = &[
    area(1, "First Settlement", "New Cairo", "first-settlement"),
    area(2, "Third Settlement", "New Cairo", "third-settlement"),
    area(3, "Fifth Settlement", "New Cairo", "fifth-settlement"),
    area(4, "South Teseen", "New Cairo", "south-teseen"),
    area(5, "North Teseen", "New Cairo", "north-teseen"),
    area(6, "Al Yasmeen", "New Cairo", "al-yasmeen"),
    area(7, "Al Banafseg", "New Cairo", "al-banafseg"),
    area(8, "Al Lotus", "New Cairo", "al-lotus"),
    area(9, "Al Narges", "New Cairo", "al-narges"),
    area(10, "South Academy", "New Cairo", "south-academy"),
    area(11, "West Arabella", "New Cairo", "west-arabella"),
    area(12, "Al Kornfol", "New Cairo", "al-kornfol"),
    area(13, "Diplomats District", "New Cairo", "diplomats-district"),
    area(14, "Abbas Al Akkad", "Nasr City", "abbas-al-akkad"),
    area(15, "Makram Ebeid", "Nasr City", "makram-ebeid"),
    area(16, "Mostafa El Nahas", "Nasr City", "mostafa-el-nahas"),
    area(17, "Petroleum Area", "Nasr City", "petroleum-area"),
    area(18, "District 7", "Nasr City", "district-7"),
    area(19, "District 10", "Nasr City", "district-10"),
    area(20, "Korba", "Heliopolis", "korba"),
    area(21, "Ard El Golf", "Heliopolis", "ard-el-golf"),
    area(22, "Sheraton", "Heliopolis", "sheraton"),
    area(23, "Almazah", "Heliopolis", "almazah"),
    area(24, "Nozha", "Heliopolis", "nozha"),
    area(25, "Degla Maadi", "Maadi", "degla-maadi"),
    area(26, "Zahraa Maadi", "Maadi", "zahraa-maadi"),
    area(27, "New Maadi", "Maadi", "new-maadi"),
    area(28, "Maadi Corniche", "Maadi", "maadi-corniche"),
    area(29, "Sheikh Zayed", "6 October", "sheikh-zayed"),
    area(30, "3rd District", "6 October", "3rd-district"),
    area(31, "5th District", "6 October", "5th-district"),
    area(32, "8th District", "6 October", "8th-district"),
    area(33, "11th District", "6 October", "11th-district"),
    area(34, "12th District", "6 October", "12th-district"),
    area(35, "Hadayek October", "6 October", "hadayek-october"),
    area(36, "New October", "6 October", "new-october"),
    area(37, "Beverly Hills", "6 October", "beverly-hills"),
    area(38, "R7", "New Capital", "r7"),
    area(39, "R8", "New Capital", "r8"),
    area(40, "Downtown", "New Capital", "downtown"),
    area(41, "Diplomatic District", "New Capital", "diplomatic-district"),
    area(42, "Government District", "New Capital", "government-district"),
    area(43, "Financial District", "New Capital", "financial-district"),
    area(44, "Zamalek", "Cairo", "zamalek"),
    area(45, "Dokki", "Cairo", "dokki"),
    area(46, "Mohandessin", "Cairo", "mohandessin"),
    area(47, "Garden City", "Cairo", "garden-city"),
    area(48, "Downtown Cairo", "Cairo", "downtown-cairo"),
    area(49, "El Mokattam", "Cairo", "el-mokattam"),
];

pub fn find_by_slug(slug: &str) -> Option<&'static Area> {
    AREAS.iter().find(|a| a.slug == slug)
}

/// Distinct cities in catalog order.
pub fn cities() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for a in AREAS {
        if !out.contains(&a.city) {
            out.push(a.city);
        }
    }
    out
}

/// Case-insensitive match on area or city name, optionally restricted to one city.
pub fn search(query: &str, city: Option<&str>) -> Vec<&'static Area> {
    let q = query.to_lowercase();
    AREAS
        .iter()
        .filter(|a| city.map_or(true, |c| a.city == c))
        .filter(|a| {
            q.is_empty() || a.name.to_lowercase().contains(&q) || a.city.to_lowercase().contains(&q)
        })
        .collect()
}
