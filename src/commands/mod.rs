// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod doctor;
pub mod exporter;
pub mod importer;
pub mod members;
pub mod reports;
pub mod transactions;
