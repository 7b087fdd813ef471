//! Fixed example seed.

use super::isaac::SEED_SIZE;

/// Fixed seed behind `RandomProvider::example()` and the pinned regression
/// vectors in the engine tests.
///
/// The words were produced once by a SplitMix64 stream started at
/// `0x5EED_CAFE_F00D_1234` (low word first) and are frozen here.
pub const EXAMPLE_SEED: [i32; SEED_SIZE] = [
    -884015220, 911905071, 127789866, -1295169949, -1982343965, -917764688,
    -11260468, -1312396341, -1474844289, 429615778, 186272965, -407810768,
    756111502, 680058394, 261443447, 1121855113, 1497649358, 664565941,
    1260646975, 640739494, -538616186, 699618772, -1994200134, -1478237439,
    -426349771, -1214752400, -1954082941, -413659200, 1277769363, -1971323894,
    1288742405, 446033605, -993943321, 1475902854, 1985164468, -614645429,
    391526790, 1232649820, 1841464256, -266610608, -2129371740, -819829605,
    1828406472, -455522969, -1134597396, -1825323311, 719266491, 688134009,
    -583404002, -2119904466, -694071817, 222920261, 487438162, 1007195061,
    259918509, -738718390, -2096818308, 463486759, -2075244872, -1325712147,
    -1357563192, 1164740419, -2046909107, -776496963, -37012509, -432287293,
    -320927743, -812327224, -486395422, 849160747, 361507641, -596770577,
    1615903015, -395592673, 675502860, 228241249, 945857116, -984187689,
    214999442, -460094331, 2128100827, 2071348655, -1537739474, 648488657,
    -1186422208, -2093039632, 1221712509, 1181777761, 464936536, 1906811005,
    1923538324, -684046854, -1752372513, -904105011, -288528366, -514263754,
    -1065262975, -773147736, -1581957349, -319640971, -874312001, -1043833218,
    -1333483762, -449007027, 124509339, 1340694224, -1060245857, -2009659449,
    -569354005, -1277991788, 1224500267, 1665296319, 1010404847, 1396515543,
    -74726412, -1791307577, -12174588, -1036365383, -1818317328, 1321320999,
    -1485181461, 886006234, -89098920, 1949693294, -1841040468, -250064465,
    1095567111, 1507813859, 1716210277, 1453894867, 1404262585, 796517216,
    -857633322, -22946192, -741493116, 165570355, 1887464333, -46489221,
    2060960283, 1333635300, 1058479399, -960158791, 648579123, 713514618,
    1501307288, -340403013, -1638707190, -1489304232, -804697099, 310047406,
    -54657855, -1005105572, -552740992, -1545498641, 1306838656, -2133396264,
    786732904, 1252522990, 1989872058, -1677402511, -1761452600, -1265287469,
    1111359925, -906369804, 383994246, 1790814702, 1253950336, -519116498,
    -1994339946, -454482331, 1785065930, 428120021, 1272299300, 705984885,
    -104400081, -772709907, 304426545, 804176329, -331833126, 764668304,
    -99081967, -1003793144, 1162392865, 1276661825, -1316289250, 1265490042,
    -46112382, 181496568, -587194636, 1209204984, 120931227, 850853274,
    -1391135369, -1387967475, -1085330874, 845839875, 264524087, -335634562,
    1337976794, -956103154, -1501171340, -792533825, -1233633756, -1532319001,
    1149287511, -1587742921, -846737580, 193800828, -636067667, -791280267,
    250487288, -2046494337, -76660058, -1727775532, -1277858165, 1949715509,
    1504911014, 1996011875, -1705524461, 1217569199, -1631970120, -2015623934,
    -1946509656, 21396406, -1646739755, -726872543, 106785177, -1256958008,
    1987804110, 2131597527, -440120188, 1010844, 1964886027, 1153134826,
    -1564405493, 1394555701, 169632933, -268582472, -1898146349, 1633219874,
    1582507441, 1304274417, -1833799693, -18984876, -24324021, -14088063,
    790971877, 852808870, -264542811, -444546118, -1419377015, 1210056895,
    1949881857, -1250723033, 472092163, -1748989599,
];
