// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `tone` - plays a test tone on the left speaker, then on the right one.

use std::path::PathBuf;
use std::time::Instant;

use log::{error, info};
use structopt::StructOpt;

use syntxt_tone::output::{with_line, SoxSink, SoxTarget};
use syntxt_tone::{Channel, PcmFormat, Result, Tone};

#[derive(Debug, StructOpt)]
#[structopt(name = "tone", about = "Playing a test tone on each speaker")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Output file (any sox-supported format). The tones are played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Frequency of the tone in Hz.
    #[structopt(long, default_value = "400")]
    frequency: i32,

    /// Length of each tone in milliseconds.
    #[structopt(long, default_value = "2000")]
    duration: i32,

    /// Volume of the tone, between 0.0 and 1.0.
    #[structopt(long, default_value = "0.5")]
    volume: f64,

    /// Length of the silence around the tones in milliseconds.
    #[structopt(long, default_value = "1000")]
    silence: i32,
}

fn main() {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    if let Err(err) = run(&opt) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<()> {
    let left = Tone::new(opt.frequency, opt.duration, opt.volume, Channel::Left)?;
    let right = Tone::new(opt.frequency, opt.duration, opt.volume, Channel::Right)?;

    let target = match &opt.output {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path.clone()),
    };
    let mut sink = SoxSink::new(target);

    with_line(&mut sink, &PcmFormat::default(), |line| {
        info!("Playing left");
        let start = Instant::now();
        left.play_silence(line, opt.silence)?;
        left.play(line)?;
        left.play_silence(line, opt.silence)?;
        info!("Finished left after {} ms", start.elapsed().as_millis());

        info!("Playing right");
        right.play(line)?;
        right.play_silence(line, opt.silence)?;
        info!("Finished right");
        Ok(())
    })?;

    info!("Finished drain and close");
    Ok(())
}
