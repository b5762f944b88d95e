//! Report tests driven by mock board, reader and expander collaborators.
//!
//! These run on the host without hardware.

use gpio_readall::{
    codes, pins, AltFunction, BoardIdentifier, BoardInfo, BuiltinTables, EffectivePin, Error,
    ExternalDevice, ExternalNode, NodeRegistry, NumberingMode, OrangePiVariant, PinLevel, PinMap,
    PinStateReader, PinTableSource, Readall, ReportConfig, Result, StaticPinMap,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

const ALT_LABELS: [&str; 8] = ["IN", "OUT", "ALT5", "ALT4", "ALT0", "ALT1", "ALT2", "OFF"];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Board identifier that counts how often it is asked
struct MockBoard {
    info: BoardInfo,
    calls: Cell<u32>,
}

impl MockBoard {
    fn new(model: u32, revision: u32) -> Self {
        MockBoard {
            info: BoardInfo {
                model,
                revision,
                ..Default::default()
            },
            calls: Cell::new(0),
        }
    }
}

impl BoardIdentifier for MockBoard {
    fn identify(&self) -> BoardInfo {
        self.calls.set(self.calls.get() + 1);
        self.info
    }
}

// Register reader with per-pin alt codes and levels, recording every query
#[derive(Default)]
struct MockReader {
    alts: HashMap<u32, u8>,
    high: HashSet<u32>,
    failing: HashSet<u32>,
    queries: RefCell<Vec<EffectivePin>>,
}

impl PinStateReader for MockReader {
    fn alt_function(&self, pin: EffectivePin) -> Result<AltFunction> {
        self.queries.borrow_mut().push(pin);
        if self.failing.contains(&pin.number) {
            return Err(Error::ReadUnsupported { pin: pin.number });
        }
        AltFunction::from_code(self.alts.get(&pin.number).copied().unwrap_or(0))
    }

    fn digital_read(&self, pin: EffectivePin) -> Result<PinLevel> {
        if self.failing.contains(&pin.number) {
            return Err(Error::ReadUnsupported { pin: pin.number });
        }
        Ok(if self.high.contains(&pin.number) {
            PinLevel::High
        } else {
            PinLevel::Low
        })
    }
}

// Expander whose analog side is unsupported
struct MockExpander;

impl ExternalDevice for MockExpander {
    fn pin_count(&self) -> u32 {
        4
    }
    fn digital_read(&self, offset: u32) -> i32 {
        i32::from(offset == 2)
    }
    fn analog_read(&self, _offset: u32) -> i32 {
        -1
    }
}

// Table source that hands out one table whatever the board
struct FixedTable(&'static StaticPinMap);

impl PinTableSource for FixedTable {
    fn table_for(&self, _info: &BoardInfo, _variant: Option<OrangePiVariant>) -> Option<&dyn PinMap> {
        Some(self.0)
    }
}

fn report(
    board: &MockBoard,
    tables: &dyn PinTableSource,
    reader: &MockReader,
    nodes: &NodeRegistry,
    config: ReportConfig,
) -> String {
    init_logging();
    let mut out = Vec::new();
    Readall::new(board, tables, reader, nodes, config)
        .generate_report(&mut out)
        .expect("report into a Vec cannot fail");
    String::from_utf8(out).expect("report is UTF-8")
}

/// Cells of every pin-pair row, split on `|` and trimmed.
/// Left pin: 1 gpio, 2 wPi, 3 name, 4 mode, 5 value, 6 physical.
/// Right pin: 8 physical, 9 value, 10 mode, 11 name, 12 wPi, 13 gpio.
fn pair_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| line.contains("||"))
        .map(|line| line.split('|').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

fn row_for(rows: &[Vec<String>], left_pin: u8) -> &Vec<String> {
    rows.iter()
        .find(|cells| cells[6] == left_pin.to_string())
        .unwrap_or_else(|| panic!("no row for pin {}", left_pin))
}

#[test]
fn test_model_b_rev2_gpio_mode_example() {
    let board = MockBoard::new(codes::model::MODEL_B, codes::revision::VERSION_2);
    let reader = MockReader::default();
    let text = report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default().with_numbering(NumberingMode::Gpio),
    );

    assert!(text.lines().next().unwrap().contains("-Model B2-"));
    let rows = pair_rows(&text);
    let row = row_for(&rows, 3);
    assert_eq!(row[1], "2");
    assert_eq!(row[2], "8");
    assert_eq!(row[3], "SDA.1");
    assert_eq!(row[4], "IN");
    assert_eq!(row[5], "0");
    assert!(reader.queries.borrow().contains(&EffectivePin {
        mode: NumberingMode::Gpio,
        number: 2
    }));
}

#[test]
fn test_unmapped_pin_renders_blank() {
    let board = MockBoard::new(codes::model::MODEL_B, codes::revision::VERSION_2);
    let text = report(
        &board,
        &BuiltinTables,
        &MockReader::default(),
        &NodeRegistry::new(),
        ReportConfig::default(),
    );
    let rows = pair_rows(&text);

    // Pins 1 (3.3v) and 2 (5v) have no GPIO.
    let row = row_for(&rows, 1);
    assert_eq!(&row[1..=5], ["", "", "3.3v", "", ""]);
    assert_eq!(&row[9..=13], ["", "", "5v", "", ""]);

    // Pin 14 (0v) is on the right of the pin 13 row.
    let row = row_for(&rows, 13);
    assert_eq!(row[1], "27");
    assert_eq!(&row[9..=13], ["", "", "0v", "", ""]);
}

#[test]
fn test_row_counts_per_layout() {
    let banana = FixedTable(&pins::RPI_REV2);
    let cases: [(u32, u32, &dyn PinTableSource, usize); 5] = [
        (codes::model::MODEL_A, 1, &BuiltinTables, 13),
        (codes::model::MODEL_B, 1, &BuiltinTables, 13),
        (codes::model::MODEL_B, 2, &BuiltinTables, 13 + 2),
        (codes::model::MODEL_B_PLUS, 0, &BuiltinTables, 20),
        (codes::model::BANANA_PRO, 0, &banana, 20),
    ];
    for (model, revision, tables, expected) in cases {
        let board = MockBoard::new(model, revision);
        let text = report(
            &board,
            tables,
            &MockReader::default(),
            &NodeRegistry::new(),
            ReportConfig::default(),
        );
        assert_eq!(pair_rows(&text).len(), expected, "model {} rev {}", model, revision);
        assert_eq!(board.calls.get(), 1);
    }
}

#[test]
fn test_rev2_renders_p5_pads() {
    let board = MockBoard::new(codes::model::MODEL_B, codes::revision::VERSION_2);
    let reader = MockReader::default();
    let text = report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default().with_numbering(NumberingMode::Physical),
    );
    let rows = pair_rows(&text);
    let row = row_for(&rows, 53);
    assert_eq!(row[1], "30");
    assert_eq!(row[3], "GPIO.19");
    assert_eq!(row[13], "31");

    // Physical mode queries header positions, in header order, never past 54.
    let queried: Vec<u32> = reader.queries.borrow().iter().map(|p| p.number).collect();
    assert!(queried.windows(2).all(|w| w[0] < w[1]), "{:?}", queried);
    assert_eq!(queried.last(), Some(&54));
    assert!(queried.iter().all(|&n| n <= 26 || (51..=54).contains(&n)));
}

#[test]
fn test_left_pin_resolved_before_right() {
    let board = MockBoard::new(codes::model::MODEL_B_PLUS, 0);
    let reader = MockReader::default();
    report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default().with_numbering(NumberingMode::Virtual),
    );

    // Map queried wPi numbers back to header positions; they must ascend.
    let by_wpi: HashMap<u32, u8> = (1..=40u8)
        .filter_map(|n| {
            let pin = gpio_readall::PhysicalPin::new(n).ok()?;
            Some((pins::RPI_REV2.physical_to_virtual(pin)?.0, n))
        })
        .collect();
    let positions: Vec<u8> = reader
        .queries
        .borrow()
        .iter()
        .map(|p| by_wpi[&p.number])
        .collect();
    assert_eq!(positions.len(), 28);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
}

#[test]
fn test_alt_function_labels() {
    let board = MockBoard::new(codes::model::MODEL_B_PLUS, 0);
    let reader = MockReader {
        alts: (0..54u32).map(|gpio| (gpio, (gpio % 8) as u8)).collect(),
        ..Default::default()
    };
    let text = report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default().with_numbering(NumberingMode::Gpio),
    );

    for row in pair_rows(&text) {
        for (gpio, mode) in [(&row[1], &row[4]), (&row[13], &row[10])] {
            if gpio.is_empty() {
                assert!(mode.is_empty());
                continue;
            }
            let code = gpio.parse::<usize>().unwrap() % 8;
            assert_eq!(mode, ALT_LABELS[code], "gpio {}", gpio);
        }
    }
}

#[test]
fn test_failed_reads_render_blank() {
    let board = MockBoard::new(codes::model::MODEL_B_PLUS, 0);
    let reader = MockReader {
        failing: HashSet::from([4]),
        high: HashSet::from([17]),
        ..Default::default()
    };
    let text = report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default().with_numbering(NumberingMode::Gpio),
    );
    let rows = pair_rows(&text);

    // Pin 7 is GPIO 4: mapped, but its state is unknown.
    let row = row_for(&rows, 7);
    assert_eq!((row[1].as_str(), row[4].as_str(), row[5].as_str()), ("4", "", ""));

    // Pin 11 is GPIO 17.
    let row = row_for(&rows, 11);
    assert_eq!((row[4].as_str(), row[5].as_str()), ("IN", "1"));
}

#[test]
fn test_compute_module_flat_layout() {
    let board = MockBoard::new(codes::model::COMPUTE_MODULE, 0);
    let reader = MockReader {
        high: HashSet::from([5]),
        alts: HashMap::from([(5, 1)]),
        ..Default::default()
    };
    let text = report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default(),
    );

    assert!(pair_rows(&text).is_empty());
    let rows: Vec<&str> = text.lines().filter(|l| l.contains("gpio-")).collect();
    assert_eq!(rows.len(), 54);
    assert_eq!(rows[5], "| gpio-5   | 5   | OUT  | High  |");
    assert_eq!(rows[6], "| gpio-6   | 6   | IN   | Low   |");

    let queried: Vec<u32> = reader.queries.borrow().iter().map(|p| p.number).collect();
    assert_eq!(queried, (0..54).collect::<Vec<u32>>());
    assert!(reader
        .queries
        .borrow()
        .iter()
        .all(|p| p.mode == NumberingMode::Virtual));
}

#[test]
fn test_external_node_overrides_board() {
    let board = MockBoard::new(codes::model::MODEL_B, codes::revision::VERSION_2);
    let reader = MockReader::default();
    let mut nodes = NodeRegistry::new();
    nodes
        .register(ExternalNode::new(100, 103, Box::new(MockExpander)).unwrap())
        .unwrap();

    let text = report(&board, &BuiltinTables, &reader, &nodes, ReportConfig::default());

    assert_eq!(board.calls.get(), 0, "board must not be identified");
    assert!(reader.queries.borrow().is_empty());
    assert!(pair_rows(&text).is_empty());

    let rows: Vec<Vec<&str>> = text
        .lines()
        .filter(|l| l.starts_with("| ") && !l.contains("Pin"))
        .map(|l| l.split('|').map(str::trim).filter(|c| !c.is_empty()).collect())
        .collect();
    assert_eq!(
        rows,
        [
            ["100", "0", "-1"],
            ["101", "0", "-1"],
            ["102", "1", "-1"],
            ["103", "0", "-1"],
        ]
    );
}

#[test]
fn test_unknown_board_model() {
    let board = MockBoard::new(42, 0);
    let reader = MockReader::default();
    let text = report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default(),
    );
    assert_eq!(text, "Oops - unable to determine board type... model: 42\n");
    assert!(reader.queries.borrow().is_empty());
}

#[test]
fn test_orange_pi_without_variant() {
    let board = MockBoard::new(codes::model::ORANGE_PI, 0);
    let text = report(
        &board,
        &BuiltinTables,
        &MockReader::default(),
        &NodeRegistry::new(),
        ReportConfig::default(),
    );
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("Oops - "));
}

#[test]
fn test_orange_pi_zero() {
    let model_path = std::env::temp_dir().join(format!("gpio-readall-opz-{}", std::process::id()));
    std::fs::write(&model_path, b"Xunlong Orange Pi Zero\0").unwrap();

    let board = MockBoard::new(codes::model::ORANGE_PI, 0);
    let config = ReportConfig::default()
        .with_orange_pi_variant(OrangePiVariant::Zero)
        .with_model_path(&model_path)
        .with_numbering(NumberingMode::Gpio);
    let text = report(
        &board,
        &BuiltinTables,
        &MockReader::default(),
        &NodeRegistry::new(),
        config,
    );
    std::fs::remove_file(&model_path).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].contains(" Xunlong Orange Pi Zero "));
    assert!(lines[1].starts_with("| GPIO |"));
    assert_eq!(lines.first(), lines.last());

    let rows = pair_rows(&text);
    assert_eq!(rows.len(), 14);
    let row = row_for(&rows, 7);
    assert_eq!((row[1].as_str(), row[2].as_str()), ("6", "2"));
    assert_eq!((row[12].as_str(), row[13].as_str()), ("3", "198"));
    let extra = row_for(&rows, 27);
    assert_eq!(extra[8], "28");
    assert_eq!(extra[1], "");
}

#[test]
fn test_orange_pi_missing_board_name() {
    let board = MockBoard::new(codes::model::ORANGE_PI, 0);
    let config = ReportConfig::default()
        .with_orange_pi_variant(OrangePiVariant::Zero2)
        .with_model_path("/nonexistent/gpio-readall/model");
    let text = report(
        &board,
        &FixedTable(&pins::ORANGE_PI_ZERO),
        &MockReader::default(),
        &NodeRegistry::new(),
        config,
    );
    assert!(text.lines().next().unwrap().contains("+----  ----+"));
    assert_eq!(pair_rows(&text).len(), 17);
}

#[test]
fn test_rev1_board_uses_rev1_table() {
    let board = MockBoard::new(codes::model::MODEL_B, codes::revision::VERSION_1);
    let text = report(
        &board,
        &BuiltinTables,
        &MockReader::default(),
        &NodeRegistry::new(),
        ReportConfig::default().with_numbering(NumberingMode::Gpio),
    );

    assert!(text.lines().next().unwrap().contains("-Model B1-"));
    let rows = pair_rows(&text);
    assert_eq!(rows.len(), 13);
    let row = row_for(&rows, 3);
    assert_eq!((row[1].as_str(), row[2].as_str()), ("0", "8"));
    let row = row_for(&rows, 5);
    assert_eq!(row[1], "1");
    let row = row_for(&rows, 13);
    assert_eq!(row[1], "21");
}

#[test]
fn test_board_without_pin_table() {
    let board = MockBoard::new(codes::model::ORANGE_PI, 0);
    let reader = MockReader::default();
    let text = report(
        &board,
        &BuiltinTables,
        &reader,
        &NodeRegistry::new(),
        ReportConfig::default().with_orange_pi_variant(OrangePiVariant::Zero2),
    );
    assert_eq!(
        text,
        format!(
            "Oops - unable to determine board type... no pin table for model: {}\n",
            codes::model::ORANGE_PI
        )
    );
    assert!(reader.queries.borrow().is_empty());
}
